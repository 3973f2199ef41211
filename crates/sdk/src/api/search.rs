//! Search parameters accepted by the Pixabay image endpoint.

use crate::error::{PixabayError, PixabayResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum accepted length of the search term, in characters.
pub const MAX_QUERY_CHARS: usize = 100;
/// Smallest page size Pixabay accepts.
pub const MIN_PER_PAGE: u32 = 3;
/// Largest page size Pixabay accepts.
pub const MAX_PER_PAGE: u32 = 200;

/// Declares a closed set of string values as an enum with serde support and
/// the list of its wire values (used for input schemas).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All accepted wire values, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Language the search term is written in.
    Language {
        Cs => "cs", Da => "da", De => "de", En => "en", Es => "es", Fr => "fr",
        Id => "id", It => "it", Hu => "hu", Nl => "nl", No => "no", Pl => "pl",
        Pt => "pt", Ro => "ro", Sk => "sk", Fi => "fi", Sv => "sv", Tr => "tr",
        Vi => "vi", Th => "th", Bg => "bg", Ru => "ru", El => "el", Ja => "ja",
        Ko => "ko", Zh => "zh",
    }
}

wire_enum! {
    ImageType {
        All => "all",
        Photo => "photo",
        Illustration => "illustration",
        Vector => "vector",
    }
}

wire_enum! {
    Orientation {
        All => "all",
        Horizontal => "horizontal",
        Vertical => "vertical",
    }
}

wire_enum! {
    Category {
        Backgrounds => "backgrounds", Fashion => "fashion", Nature => "nature",
        Science => "science", Education => "education", Feelings => "feelings",
        Health => "health", People => "people", Religion => "religion",
        Places => "places", Animals => "animals", Industry => "industry",
        Computer => "computer", Food => "food", Sports => "sports",
        Transportation => "transportation", Travel => "travel",
        Buildings => "buildings", Business => "business", Music => "music",
    }
}

wire_enum! {
    /// Color filter. Several may be combined; they are sent comma separated.
    Color {
        Grayscale => "grayscale", Transparent => "transparent", Red => "red",
        Orange => "orange", Yellow => "yellow", Green => "green",
        Turquoise => "turquoise", Blue => "blue", Lilac => "lilac", Pink => "pink",
        White => "white", Gray => "gray", Black => "black", Brown => "brown",
    }
}

wire_enum! {
    Order {
        Popular => "popular",
        Latest => "latest",
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl Default for ImageType {
    fn default() -> Self {
        Self::All
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::All
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::Popular
    }
}

/// Parameters for an image search.
///
/// Deserializes from the tool-facing field names (`query`, ...) and
/// serializes to Pixabay's query string (`q`, ...). Absent fields take the
/// documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename(serialize = "q", deserialize = "query"))]
    pub query: String,
    #[serde(default)]
    pub lang: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub image_type: ImageType,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub min_width: u32,
    #[serde(default)]
    pub min_height: u32,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_colors",
        deserialize_with = "deserialize_colors"
    )]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub editors_choice: bool,
    #[serde(default)]
    pub safesearch: bool,
    #[serde(default)]
    pub order: Order,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl SearchParams {
    /// Create search parameters for `query` with every other field defaulted.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            lang: Language::default(),
            id: None,
            image_type: ImageType::default(),
            orientation: Orientation::default(),
            category: None,
            min_width: 0,
            min_height: 0,
            colors: Vec::new(),
            editors_choice: false,
            safesearch: false,
            order: Order::default(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }

    pub fn lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    pub fn image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = image_type;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn safesearch(mut self, safesearch: bool) -> Self {
        self.safesearch = safesearch;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Check the bounds Pixabay documents but does not let serde express.
    pub fn validate(&self) -> PixabayResult<()> {
        let query_chars = self.query.chars().count();
        if query_chars > MAX_QUERY_CHARS {
            return Err(PixabayError::InvalidInput(format!(
                "query must be at most {} characters, got {}",
                MAX_QUERY_CHARS, query_chars
            )));
        }

        if self.page < 1 {
            return Err(PixabayError::InvalidInput(
                "page must be at least 1".to_string(),
            ));
        }

        if !(MIN_PER_PAGE..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(PixabayError::InvalidInput(format!(
                "per_page must be between {} and {}, got {}",
                MIN_PER_PAGE, MAX_PER_PAGE, self.per_page
            )));
        }

        Ok(())
    }
}

fn serialize_colors<S: Serializer>(colors: &[Color], serializer: S) -> Result<S::Ok, S::Error> {
    let joined = colors
        .iter()
        .map(Color::as_str)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

fn deserialize_colors<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Color>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Color::parse(part).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "unknown color `{}`, expected one of: {}",
                    part,
                    Color::VALUES.join(", ")
                ))
            })
        })
        .collect()
}
