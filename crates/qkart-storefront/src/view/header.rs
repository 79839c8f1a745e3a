use std::fmt::Write as _;

use qkart_core::Session;

pub struct HeaderView<'a> {
    pub session: &'a Session,
    /// `None` hides the search box (login and register pages).
    pub search_value: Option<&'a str>,
    /// Replaces the auth controls with a "Back to explore" link.
    pub hide_auth_buttons: bool,
}

#[must_use]
pub fn render_header(header: &HeaderView<'_>) -> String {
    let mut out = String::from("QKart");

    if let Some(value) = header.search_value {
        let _ = write!(out, "  [ Search for items/categories: {value} ]");
    }

    if header.hide_auth_buttons {
        out.push_str("  <- Back to explore\n");
    } else if let Some(username) = header.session.username() {
        let _ = writeln!(out, "  {username}  [LOGOUT]");
    } else {
        out.push_str("  [LOGIN]  [REGISTER]\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_header_offers_login_and_register() {
        let session = Session::Anonymous;
        let out = render_header(&HeaderView {
            session: &session,
            search_value: Some("ball"),
            hide_auth_buttons: false,
        });
        assert!(out.contains("[LOGIN]"));
        assert!(out.contains("[REGISTER]"));
        assert!(out.contains("ball"));
    }

    #[test]
    fn authenticated_header_shows_username_and_logout() {
        let session = Session::authenticated("crio-user", "tok");
        let out = render_header(&HeaderView {
            session: &session,
            search_value: None,
            hide_auth_buttons: false,
        });
        assert!(out.contains("crio-user"));
        assert!(out.contains("[LOGOUT]"));
        assert!(!out.contains("Search"));
    }

    #[test]
    fn hidden_auth_buttons_show_back_link() {
        let session = Session::authenticated("crio-user", "tok");
        let out = render_header(&HeaderView {
            session: &session,
            search_value: None,
            hide_auth_buttons: true,
        });
        assert!(out.contains("Back to explore"));
        assert!(!out.contains("[LOGOUT]"));
    }
}
