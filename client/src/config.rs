use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://leetcodefriends.online";

/// Backend base URL, fixed at build time (`FRIENDS_API_BASE=http://127.0.0.1:5000` for the dev server).
pub fn api_base() -> &'static str {
    option_env!("FRIENDS_API_BASE")
        .map(|value| value.trim_end_matches('/'))
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

pub const LOG_FILTER: &str = "friends_client=debug,friends_shared=debug,info";

pub const IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);
pub const ELEMENT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Web-accessible resource holding the page-context resolver loader.
pub const RESOLVER_SCRIPT: &str = "resolver/friends_resolver.js";

pub const POPUP_HOST_ID: &str = "friends-popup-host";
pub const POPUP_WIDTH_PX: f64 = 640.0;
/// Vertical space left below the popup for the page navbar.
pub const POPUP_VIEWPORT_MARGIN_PX: f64 = 57.0;
pub const PREFS_STORAGE_KEY: &str = "friends_panel_prefs";

/// Where the friends button goes: first matching URL prefix wins.
pub struct NavbarAnchor {
    pub url_prefix: &'static str,
    pub selector: &'static str,
    pub insert_index: u32,
}

pub const NAVBAR_ANCHORS: &[NavbarAnchor] = &[
    NavbarAnchor {
        url_prefix: "https://leetcode.com/problems/",
        selector: "nav.z-nav-1 .relative.ml-4.flex.items-center.gap-2",
        insert_index: 3,
    },
    NavbarAnchor {
        url_prefix: "https://leetcode.com",
        selector: "nav#leetcode-navbar .relative.flex.items-center.space-x-2",
        insert_index: 2,
    },
];

pub fn anchor_for(href: &str) -> Option<&'static NavbarAnchor> {
    NAVBAR_ANCHORS
        .iter()
        .find(|anchor| href.starts_with(anchor.url_prefix))
}

#[cfg(test)]
mod tests {
    use super::anchor_for;

    #[test]
    fn problem_pages_use_problem_navbar() {
        let anchor = anchor_for("https://leetcode.com/problems/two-sum/").expect("anchor");
        assert_eq!(anchor.insert_index, 3);
    }

    #[test]
    fn other_pages_use_main_navbar() {
        let anchor = anchor_for("https://leetcode.com/problemset/").expect("anchor");
        assert_eq!(anchor.insert_index, 2);
        assert!(anchor_for("https://example.com/").is_none());
    }
}
