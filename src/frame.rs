// Farcaster frame descriptors: image, buttons, and where presses post back

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameView {
    Home,
    Dashboard,
    Portfolio,
    Alerts,
    Settings,
}

impl FrameView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Dashboard => "dashboard",
            Self::Portfolio => "portfolio",
            Self::Alerts => "alerts",
            Self::Settings => "settings",
        }
    }

    // unknown actions land on the home frame
    pub fn from_action(action: &str) -> Self {
        match action {
            "dashboard" => Self::Dashboard,
            "portfolio" => Self::Portfolio,
            "alerts" => Self::Alerts,
            "settings" => Self::Settings,
            _ => Self::Home,
        }
    }

    // Farcaster numbers buttons from 1. Anything that is not one of those
    // numbers, strings included, lands on the home frame.
    pub fn from_button_index(index: Option<&Value>) -> Self {
        let index = index.and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        });
        match index {
            Some(1) => Self::Dashboard,
            Some(2) => Self::Portfolio,
            Some(3) => Self::Alerts,
            Some(4) => Self::Settings,
            _ => Self::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    Post,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameButton {
    pub label: String,
    pub action: ButtonAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl FrameButton {
    fn post(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Post,
            target: None,
        }
    }

    fn link(label: &str, target: String) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Link,
            target: Some(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameData {
    pub image: String,
    pub buttons: Vec<FrameButton>,
    pub post_url: String,
    // serialized as null when absent
    pub input_text: Option<String>,
}

pub fn frame_data(view: FrameView, base_url: &str) -> FrameData {
    let buttons = match view {
        FrameView::Home => vec![
            FrameButton::post("📊 Dashboard"),
            FrameButton::post("💼 Portfolio"),
            FrameButton::post("🔔 Alerts"),
            FrameButton::post("⚙️ Settings"),
        ],
        FrameView::Dashboard => vec![
            FrameButton::post("🔄 Refresh"),
            FrameButton::post("📈 Trends"),
            FrameButton::post("🏠 Home"),
            FrameButton::post("💼 Portfolio"),
        ],
        FrameView::Portfolio => vec![
            FrameButton::post("➕ Add Asset"),
            FrameButton::post("🔄 Refresh"),
            FrameButton::post("🏠 Home"),
            FrameButton::post("🔔 Alerts"),
        ],
        FrameView::Alerts => vec![
            FrameButton::post("➕ New Alert"),
            FrameButton::post("🔄 Refresh"),
            FrameButton::post("🏠 Home"),
            FrameButton::post("💼 Portfolio"),
        ],
        FrameView::Settings => vec![
            FrameButton::link("🔗 Connect Wallet", format!("{base_url}/connect")),
            FrameButton::post("📱 Notifications"),
            FrameButton::post("🏠 Home"),
            FrameButton::link("💎 Upgrade", format!("{base_url}/upgrade")),
        ],
    };

    let input_text = match view {
        FrameView::Portfolio => Some("Enter asset symbol (e.g., BTC, ETH)".to_string()),
        FrameView::Alerts => Some("Enter price target (e.g., BTC:50000)".to_string()),
        _ => None,
    };

    FrameData {
        image: format!("{base_url}/api/frame/image?type={}", view.as_str()),
        buttons,
        post_url: format!("{base_url}/api/frame"),
        input_text,
    }
}

// Frame POST body. Both halves must be present and non-null; their
// contents are taken as sent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionRequest {
    pub untrusted_data: Option<UntrustedData>,
    pub trusted_data: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    pub button_index: Option<Value>,
    pub fid: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://frames.example";

    #[test]
    fn unknown_action_is_home() {
        assert_eq!(FrameView::from_action("wat"), FrameView::Home);
        assert_eq!(FrameView::from_action("alerts"), FrameView::Alerts);
    }

    #[test]
    fn button_indices() {
        let pick = |v: Value| FrameView::from_button_index(Some(&v));

        assert_eq!(pick(json!(1)), FrameView::Dashboard);
        assert_eq!(pick(json!(2.0)), FrameView::Portfolio);
        assert_eq!(pick(json!(4)), FrameView::Settings);
        assert_eq!(pick(json!(5)), FrameView::Home);
        assert_eq!(pick(json!(1.5)), FrameView::Home);
        assert_eq!(pick(json!("1")), FrameView::Home);
        assert_eq!(pick(json!(null)), FrameView::Home);
        assert_eq!(FrameView::from_button_index(None), FrameView::Home);
    }

    #[test]
    fn loosely_typed_untrusted_data_still_parses() {
        let body: FrameActionRequest = serde_json::from_value(json!({
            "untrustedData": { "buttonIndex": "3", "fid": -5, "castId": { "hash": "0x1" } },
            "trustedData": { "messageBytes": "ab" }
        }))
        .unwrap();

        let untrusted = body.untrusted_data.unwrap();
        assert_eq!(untrusted.fid, Some(json!(-5)));
        assert_eq!(
            FrameView::from_button_index(untrusted.button_index.as_ref()),
            FrameView::Home
        );
    }

    #[test]
    fn every_frame_has_four_buttons_and_posts_back() {
        for view in [
            FrameView::Home,
            FrameView::Dashboard,
            FrameView::Portfolio,
            FrameView::Alerts,
            FrameView::Settings,
        ] {
            let frame = frame_data(view, BASE);
            assert_eq!(frame.buttons.len(), 4);
            assert_eq!(frame.post_url, "https://frames.example/api/frame");
            assert!(frame.image.ends_with(&format!("type={}", view.as_str())));
        }
    }

    #[test]
    fn settings_links_carry_targets() {
        let value = serde_json::to_value(frame_data(FrameView::Settings, BASE)).unwrap();

        assert_eq!(value["buttons"][0]["action"], json!("link"));
        assert_eq!(value["buttons"][0]["target"], json!("https://frames.example/connect"));
        assert!(value["buttons"][1].get("target").is_none());
        assert_eq!(value["inputText"], json!(null));
    }

    #[test]
    fn portfolio_frame_asks_for_input() {
        let frame = frame_data(FrameView::Portfolio, BASE);
        assert_eq!(frame.input_text.as_deref(), Some("Enter asset symbol (e.g., BTC, ETH)"));
    }
}
