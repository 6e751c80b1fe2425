//! Cursor shapes reported by the session engine and their CSS rendering.

/// What the engine wants the local pointer to look like.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorStyle {
    /// The remote side draws its own pointer; hide the local one.
    Hidden,
    /// Plain system arrow.
    Default,
    /// A custom bitmap, usually a `data:` URL, with its hotspot in pixels.
    Url {
        data: String,
        hotspot_x: f64,
        hotspot_y: f64,
    },
}

impl CursorStyle {
    pub fn url(data: impl Into<String>, hotspot_x: f64, hotspot_y: f64) -> Self {
        CursorStyle::Url {
            data: data.into(),
            hotspot_x,
            hotspot_y,
        }
    }

    /// Renders the value for the canvas `cursor` CSS property.
    ///
    /// Hotspot coordinates are rounded to whole pixels; the trailing
    /// `default` is the fallback browsers require for `url()` cursors.
    pub fn to_css(&self) -> String {
        match self {
            CursorStyle::Hidden => "none".to_string(),
            CursorStyle::Default => "default".to_string(),
            CursorStyle::Url {
                data,
                hotspot_x,
                hotspot_y,
            } => format!(
                "url({data}) {} {}, default",
                hotspot_x.round() as i64,
                hotspot_y.round() as i64
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_styles() {
        assert_eq!(CursorStyle::Hidden.to_css(), "none");
        assert_eq!(CursorStyle::Default.to_css(), "default");
    }

    #[test]
    fn test_url_style_rounds_hotspot() {
        let style = CursorStyle::url("data:image/png;base64,AAAA", 3.6, 0.4);
        assert_eq!(style.to_css(), "url(data:image/png;base64,AAAA) 4 0, default");
    }
}
