use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog entry: display name plus preview thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub name: &'static str,
    pub preview: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Realistic,
    Cinematic,
    Cartoon,
    Cyberpunk,
    Fantasy,
    Watercolor,
    #[serde(rename = "Pixel Art")]
    PixelArt,
    Abstract,
}

impl Style {
    pub const ALL: [Style; 8] = [
        Style::Realistic,
        Style::Cinematic,
        Style::Cartoon,
        Style::Cyberpunk,
        Style::Fantasy,
        Style::Watercolor,
        Style::PixelArt,
        Style::Abstract,
    ];

    pub fn name(&self) -> &'static str {
        self.option().name
    }

    pub fn option(&self) -> StyleOption {
        let (name, preview) = match self {
            Style::Realistic => ("Realistic", "https://picsum.photos/id/1062/100/100"),
            Style::Cinematic => ("Cinematic", "https://picsum.photos/id/1015/100/100"),
            Style::Cartoon => ("Cartoon", "https://picsum.photos/id/1025/100/100"),
            Style::Cyberpunk => ("Cyberpunk", "https://picsum.photos/id/1078/100/100"),
            Style::Fantasy => ("Fantasy", "https://picsum.photos/id/10/100/100"),
            Style::Watercolor => ("Watercolor", "https://picsum.photos/id/488/100/100"),
            Style::PixelArt => ("Pixel Art", "https://picsum.photos/id/342/100/100"),
            Style::Abstract => ("Abstract", "https://picsum.photos/id/99/100/100"),
        };
        StyleOption { name, preview }
    }

    pub fn from_name(name: &str) -> Option<Style> {
        Style::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn catalog() -> Vec<StyleOption> {
        Style::ALL.iter().map(Style::option).collect()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
    ];

    /// Width:height.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Landscape => (16, 9),
            AspectRatio::Portrait => (9, 16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square",
            AspectRatio::Landscape => "Landscape",
            AspectRatio::Portrait => "Portrait",
        }
    }

    pub fn parse(value: &str) -> Option<AspectRatio> {
        AspectRatio::ALL.into_iter().find(|ratio| {
            ratio.as_str() == value.trim() || ratio.label().eq_ignore_ascii_case(value.trim())
        })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
