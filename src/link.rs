//! Recognition of Deezer links and special query forms.
//!
//! Three kinds of input are recognized:
//!
//! * Canonical links such as `https://www.deezer.com/en/album/302127`,
//!   classified into a [`ResolvedUrl`] by [`classify`]
//! * Share links such as `https://deezer.page.link/abc`, which redirect to a
//!   canonical link and are detected by [`is_share_link`]
//! * ISRC queries such as `dzisrc:GBDUW0000059`, parsed by [`isrc`]

use std::{fmt, str::FromStr, sync::LazyLock};

use regex_lite::Regex;

/// Matches canonical links with or without scheme, `www.` and a two-letter
/// locale segment.
static DEEZER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?deezer\.com/(?:\w{2}/)?(track|album|playlist|artist)/(\d+)",
    )
    .expect("invalid deezer link pattern")
});

/// Query prefix requesting a track lookup by ISRC.
pub const ISRC_PREFIX: &str = "dzisrc:";

/// Type of content a canonical link points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Track,
    Album,
    Playlist,
    Artist,
}

impl Kind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Playlist => "playlist",
            Self::Artist => "artist",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(Self::Track),
            "album" => Ok(Self::Album),
            "playlist" => Ok(Self::Playlist),
            "artist" => Ok(Self::Artist),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// Content type and numeric id extracted from a canonical link.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedUrl {
    pub kind: Kind,
    pub id: String,
}

/// Extracts the content type and id from a canonical Deezer link.
///
/// Returns `None` for anything else, including share links.
#[must_use]
pub fn classify(text: &str) -> Option<ResolvedUrl> {
    let captures = DEEZER_LINK.captures(text)?;
    let kind = captures.get(1)?.as_str().parse().ok()?;
    let id = captures.get(2)?.as_str().to_owned();

    Some(ResolvedUrl { kind, id })
}

/// Whether `text` is a canonical Deezer link.
#[must_use]
pub fn is_deezer_url(text: &str) -> bool {
    DEEZER_LINK.is_match(text)
}

#[must_use]
pub fn is_share_link(text: &str, prefix: &str) -> bool {
    text.starts_with(prefix)
}

/// Returns the ISRC of a `dzisrc:` query, if it is one.
#[must_use]
pub fn isrc(text: &str) -> Option<&str> {
    text.strip_prefix(ISRC_PREFIX)
        .map(str::trim)
        .filter(|code| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(kind: Kind, id: &str) -> Option<ResolvedUrl> {
        Some(ResolvedUrl {
            kind,
            id: id.to_owned(),
        })
    }

    #[test]
    fn classifies_every_kind() {
        assert_eq!(
            classify("https://www.deezer.com/track/3135556"),
            resolved(Kind::Track, "3135556")
        );
        assert_eq!(
            classify("https://www.deezer.com/album/302127"),
            resolved(Kind::Album, "302127")
        );
        assert_eq!(
            classify("https://www.deezer.com/playlist/908622995"),
            resolved(Kind::Playlist, "908622995")
        );
        assert_eq!(
            classify("https://www.deezer.com/artist/27"),
            resolved(Kind::Artist, "27")
        );
    }

    #[test]
    fn scheme_www_and_locale_are_optional() {
        for text in [
            "deezer.com/track/1",
            "www.deezer.com/track/1",
            "http://deezer.com/track/1",
            "https://www.deezer.com/fr/track/1",
            "https://deezer.com/en/track/1?utm_source=share",
        ] {
            assert_eq!(classify(text), resolved(Kind::Track, "1"), "{text}");
        }
    }

    #[test]
    fn rejects_other_inputs() {
        for text in [
            "daft punk",
            "",
            "https://www.deezer.com/show/1000",
            "https://www.deezer.com/track/abc",
            "https://www.deezer.com/english/track/1",
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC",
            "https://deezer.page.link/4Ls3bT2BZxhXAhXw9",
            "see https://www.deezer.com/track/1",
        ] {
            assert_eq!(classify(text), None, "{text}");
            assert!(!is_deezer_url(text), "{text}");
        }
    }

    #[test]
    fn share_links_by_prefix() {
        let prefix = "https://deezer.page.link/";
        assert!(is_share_link("https://deezer.page.link/4Ls3bT2BZxhXAhXw9", prefix));
        assert!(!is_share_link("https://www.deezer.com/track/1", prefix));
    }

    #[test]
    fn isrc_queries() {
        assert_eq!(isrc("dzisrc:GBDUW0000059"), Some("GBDUW0000059"));
        assert_eq!(isrc("dzisrc:"), None);
        assert_eq!(isrc("dzisrc:GB-DUW"), None);
        assert_eq!(isrc("GBDUW0000059"), None);
    }
}
