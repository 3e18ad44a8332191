//! Listing sections and the bare-token lookup order.

use serde::{Deserialize, Serialize};

/// A section of the LJOB listing.
///
/// Each section owns its own closed set of attribute labels; sections never
/// share keys. The header table at the top of the listing has no banner of
/// its own — it is implicitly active until the first banner appears.
///
/// # Examples
///
/// ```
/// use ljob_core::Section;
///
/// assert_eq!(Section::from_banner_title("JOB INFORMATION"), Some(Section::JobInformation));
/// assert_eq!(Section::from_banner_title("agent information"), Some(Section::AgentInformation));
/// assert_eq!(Section::from_banner_title("SCHEDULE"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The banner-less fixed-column table at the top of the listing.
    Header,
    /// The `JOB INFORMATION` section (flags, key=value runs, narrative lines).
    JobInformation,
    /// The `AGENT INFORMATION` section (`Label : Value` lines).
    AgentInformation,
    /// The free-text documentation paragraph.
    Prose,
}

impl Section {
    /// Sections in the order consulted by bare-token lookup.
    ///
    /// A label defined in two sections resolves to the earlier entry here,
    /// so shadowing is a property of this table rather than of call-site
    /// control flow.
    pub const PRECEDENCE: [Section; 4] = [
        Section::Header,
        Section::JobInformation,
        Section::AgentInformation,
        Section::Prose,
    ];

    /// The banner title announcing this section, or `None` for the
    /// banner-less header.
    pub const fn banner_title(self) -> Option<&'static str> {
        match self {
            Section::Header => None,
            Section::JobInformation => Some("JOB INFORMATION"),
            Section::AgentInformation => Some("AGENT INFORMATION"),
            Section::Prose => Some("PROSE"),
        }
    }

    /// Matches a banner title to a section. Case-insensitive, exact on the
    /// trimmed text.
    pub fn from_banner_title(title: &str) -> Option<Section> {
        let title = title.trim();
        Section::PRECEDENCE.into_iter().find(|section| {
            section
                .banner_title()
                .is_some_and(|known| known.eq_ignore_ascii_case(title))
        })
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::JobInformation => "job information",
            Section::AgentInformation => "agent information",
            Section::Prose => "prose",
        };
        f.write_str(name)
    }
}
