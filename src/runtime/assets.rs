//! Editor assets
//!
//! The block editor screens load one stylesheet and one script shipped with
//! the plugin plus an icon font. This module only describes them; the host
//! enqueues them.

use serde::Serialize;

use super::options::BuilderOptions;

/// Admin screens that host the block editor
pub const EDITOR_SCREENS: [&str; 2] = ["post.php", "post-new.php"];

const ICON_FONT_URL: &str = "https://use.fontawesome.com/releases/v5.8.1/css/all.css";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Style,
    Script,
}

/// One asset to enqueue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorAsset {
    pub handle: String,
    pub kind: AssetKind,
    pub src: String,
    pub version: String,
    /// Scripts only: load at the end of the page
    pub in_footer: bool,
}

/// Assets for the admin screen `screen`; empty unless it hosts the editor
pub fn editor_assets(screen: &str, options: &BuilderOptions) -> Vec<EditorAsset> {
    if !EDITOR_SCREENS.contains(&screen) {
        return Vec::new();
    }

    let local = |path: &str| format!("{}{}", options.asset_base_url, path);
    vec![
        EditorAsset {
            handle: "gutenberg-editor".to_string(),
            kind: AssetKind::Style,
            src: local("src/assets/editor.css"),
            version: options.asset_version.clone(),
            in_footer: false,
        },
        EditorAsset {
            handle: "font-awesome-icons".to_string(),
            kind: AssetKind::Style,
            src: ICON_FONT_URL.to_string(),
            version: options.asset_version.clone(),
            in_footer: false,
        },
        EditorAsset {
            handle: "gutenberg-editor-custom".to_string(),
            kind: AssetKind::Script,
            src: local("src/assets/acf.js"),
            version: options.asset_version.clone(),
            in_footer: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_assets_outside_editor() {
        assert!(editor_assets("index.php", &BuilderOptions::default()).is_empty());
    }

    #[test]
    fn test_editor_assets_resolved_against_base_url() {
        let options = BuilderOptions {
            asset_base_url: "https://example.com/wp-content/plugins/acf-blocks/".to_string(),
            ..Default::default()
        };

        let assets = editor_assets("post-new.php", &options);
        let handles: Vec<&str> = assets.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(
            handles,
            vec!["gutenberg-editor", "font-awesome-icons", "gutenberg-editor-custom"]
        );
        assert_eq!(
            assets[2].src,
            "https://example.com/wp-content/plugins/acf-blocks/src/assets/acf.js"
        );
        assert!(assets[2].in_footer);
        assert_eq!(assets[1].src, ICON_FONT_URL);
    }
}
