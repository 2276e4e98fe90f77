use serde::Deserialize;

/// Default autoplay cadence when a gallery enables autoplay without
/// naming a delay.
pub(crate) const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 3000;

/// The parsed showcase document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deck {
    /// Headline shown in the hero section and the status bar.
    pub title: String,
    /// Secondary line under the headline.
    #[serde(default)]
    pub tagline: String,
    /// Card galleries, in page order.
    #[serde(default)]
    pub galleries: Vec<Gallery>,
    /// Optional contact section appended after the galleries.
    #[serde(default)]
    pub contact: Option<ContactInfo>,
}

/// One carousel's worth of cards plus its widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Gallery {
    /// Stable identifier, used by the page controller to address the
    /// gallery's carousel instance.
    pub id: String,
    /// Section heading shown above the cards.
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Whether the gallery advances on a timer.
    #[serde(default)]
    pub autoplay: bool,
    /// Timer cadence in milliseconds. Must be positive.
    #[serde(default = "default_autoplay_delay_ms")]
    pub autoplay_delay_ms: u64,
    /// Whether dot indicators render under the cards.
    #[serde(default = "default_true")]
    pub show_dots: bool,
    /// Whether previous/next arrows render beside the cards.
    #[serde(default = "default_true")]
    pub show_navigation: bool,
}

/// One visual card. Content is opaque to the carousel; only the renderer
/// looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Short label rendered above the summary (e.g. a category).
    #[serde(default)]
    pub tag: Option<String>,
    /// Destination copied to the clipboard when the card is yanked.
    #[serde(default)]
    pub link: Option<String>,
}

/// Static copy for the contact section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactInfo {
    #[serde(default = "default_contact_heading")]
    pub heading: String,
    #[serde(default)]
    pub blurb: String,
}

fn default_autoplay_delay_ms() -> u64 {
    DEFAULT_AUTOPLAY_DELAY_MS
}

const fn default_true() -> bool {
    true
}

fn default_contact_heading() -> String {
    "Contact".to_string()
}

impl Deck {
    /// Total number of cards across all galleries.
    pub fn card_count(&self) -> usize {
        self.galleries.iter().map(|g| g.cards.len()).sum()
    }

    /// Look up a gallery by its identifier.
    pub fn gallery(&self, id: &str) -> Option<&Gallery> {
        self.galleries.iter().find(|g| g.id == id)
    }
}
