//! Country tokens accepted by the Indeed search and the lookup that maps
//! free-form user input onto them.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// A canonical country token together with the Indeed sub-domain serving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Country {
    name: &'static str,
    subdomain: &'static str,
}

impl Country {
    const fn new(name: &'static str, subdomain: &'static str) -> Self {
        Country { name, subdomain }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn indeed_subdomain(&self) -> &'static str {
        self.subdomain
    }

    pub fn indeed_base_url(&self) -> String {
        format!("https://{}.indeed.com", self.subdomain)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

static COUNTRIES: &[Country] = &[
    Country::new("argentina", "ar"),
    Country::new("australia", "au"),
    Country::new("austria", "at"),
    Country::new("bahrain", "bh"),
    Country::new("bangladesh", "bd"),
    Country::new("belgium", "be"),
    Country::new("bulgaria", "bg"),
    Country::new("brazil", "br"),
    Country::new("canada", "ca"),
    Country::new("chile", "cl"),
    Country::new("china", "cn"),
    Country::new("colombia", "co"),
    Country::new("costa rica", "cr"),
    Country::new("croatia", "hr"),
    Country::new("cyprus", "cy"),
    Country::new("czech republic", "cz"),
    Country::new("denmark", "dk"),
    Country::new("ecuador", "ec"),
    Country::new("egypt", "eg"),
    Country::new("estonia", "ee"),
    Country::new("finland", "fi"),
    Country::new("france", "fr"),
    Country::new("germany", "de"),
    Country::new("greece", "gr"),
    Country::new("hong kong", "hk"),
    Country::new("hungary", "hu"),
    Country::new("india", "in"),
    Country::new("indonesia", "id"),
    Country::new("ireland", "ie"),
    Country::new("israel", "il"),
    Country::new("italy", "it"),
    Country::new("japan", "jp"),
    Country::new("kuwait", "kw"),
    Country::new("latvia", "lv"),
    Country::new("lithuania", "lt"),
    Country::new("luxembourg", "lu"),
    Country::new("malaysia", "malaysia"),
    Country::new("malta", "malta"),
    Country::new("mexico", "mx"),
    Country::new("morocco", "ma"),
    Country::new("netherlands", "nl"),
    Country::new("new zealand", "nz"),
    Country::new("nigeria", "ng"),
    Country::new("norway", "no"),
    Country::new("oman", "om"),
    Country::new("pakistan", "pk"),
    Country::new("panama", "pa"),
    Country::new("peru", "pe"),
    Country::new("philippines", "ph"),
    Country::new("poland", "pl"),
    Country::new("portugal", "pt"),
    Country::new("qatar", "qa"),
    Country::new("romania", "ro"),
    Country::new("saudi arabia", "sa"),
    Country::new("singapore", "sg"),
    Country::new("slovakia", "sk"),
    Country::new("slovenia", "si"),
    Country::new("south africa", "za"),
    Country::new("south korea", "kr"),
    Country::new("spain", "es"),
    Country::new("sweden", "se"),
    Country::new("switzerland", "ch"),
    Country::new("taiwan", "tw"),
    Country::new("thailand", "th"),
    Country::new("turkey", "tr"),
    Country::new("ukraine", "ua"),
    Country::new("united arab emirates", "ae"),
    Country::new("united kingdom", "uk"),
    Country::new("united states", "www"),
    Country::new("uruguay", "uy"),
    Country::new("venezuela", "ve"),
    Country::new("vietnam", "vn"),
    Country::new("usa/ca", "www"),
    Country::new("worldwide", "www"),
];

/// Alternative spellings mapped to a canonical name in `COUNTRIES`.
///
/// Canonical names are not repeated here: `normalize_location` accepts them
/// in its second step, right after this table.
static ALIASES: &[(&str, &str)] = &[
    ("uk", "united kingdom"),
    ("gb", "united kingdom"),
    ("great britain", "united kingdom"),
    ("britain", "united kingdom"),
    ("england", "united kingdom"),
    ("us", "united states"),
    ("usa", "united states"),
    ("u.s.", "united states"),
    ("u.s.a.", "united states"),
    ("america", "united states"),
    ("united states of america", "united states"),
    ("czechia", "czech republic"),
    ("türkiye", "turkey"),
    ("turkiye", "turkey"),
    ("uae", "united arab emirates"),
    ("emirates", "united arab emirates"),
    ("korea", "south korea"),
    ("republic of korea", "south korea"),
    ("holland", "netherlands"),
    ("the netherlands", "netherlands"),
    ("ksa", "saudi arabia"),
    ("hongkong", "hong kong"),
    ("viet nam", "vietnam"),
    ("us/canada", "usa/ca"),
    ("usa/canada", "usa/ca"),
    ("global", "worldwide"),
    ("remote", "worldwide"),
];

/// How a location was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The input was a canonical token.
    Exact(Country),
    /// The input was a listed alternative spelling.
    Alias { alias: String, country: Country },
    /// The input was a fragment of exactly one canonical token.
    Assumed { input: String, country: Country },
}

impl Resolution {
    pub fn country(&self) -> Country {
        match self {
            Resolution::Exact(country)
            | Resolution::Alias { country, .. }
            | Resolution::Assumed { country, .. } => *country,
        }
    }

    /// Notice shown to the user when the match was a guess.
    pub fn assumption_notice(&self) -> Option<String> {
        match self {
            Resolution::Assumed { input, country } => {
                Some(format!("Assuming '{input}' means '{country}'"))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("'{input}' is not a recognized country")]
    Unknown {
        input: String,
        valid: Vec<&'static str>,
    },
    #[error("'{input}' matches several countries: {}", .candidates.join(", "))]
    Ambiguous {
        input: String,
        candidates: Vec<&'static str>,
        valid: Vec<&'static str>,
    },
}

impl LocationError {
    /// Sorted canonical tokens to show the user.
    pub fn valid(&self) -> &[&'static str] {
        match self {
            LocationError::Unknown { valid, .. } | LocationError::Ambiguous { valid, .. } => valid,
        }
    }
}

/// All canonical tokens, sorted.
pub fn valid_countries() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COUNTRIES.iter().map(|c| c.name).collect();
    names.sort_unstable();
    names
}

fn canonical(name: &str) -> Option<Country> {
    COUNTRIES.iter().copied().find(|c| c.name == name)
}

/// Resolves free-form location text to a canonical country token.
///
/// Tried in order: the alias table, the canonical names, then a substring
/// match that is accepted only when it singles out one country.
pub fn normalize_location(raw: &str) -> Result<Resolution, LocationError> {
    let input = raw.trim().to_lowercase();

    if let Some(country) = ALIASES
        .iter()
        .find(|(alias, _)| *alias == input)
        .and_then(|(_, name)| canonical(name))
    {
        debug!(%input, %country, "location resolved through alias");
        return Ok(Resolution::Alias { alias: input, country });
    }

    if let Some(country) = canonical(&input) {
        return Ok(Resolution::Exact(country));
    }

    let candidates: Vec<Country> = COUNTRIES
        .iter()
        .copied()
        .filter(|c| c.name.contains(input.as_str()) || c.name.starts_with(input.as_str()))
        .collect();

    match candidates.as_slice() {
        [country] => {
            debug!(%input, country = %country, "location resolved by substring");
            Ok(Resolution::Assumed {
                input,
                country: *country,
            })
        }
        [] => Err(LocationError::Unknown {
            input,
            valid: valid_countries(),
        }),
        many => {
            let mut candidates: Vec<&'static str> = many.iter().map(|c| c.name).collect();
            candidates.sort_unstable();
            Err(LocationError::Ambiguous {
                input,
                candidates,
                valid: valid_countries(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_maps_to_its_country() {
        for (alias, name) in ALIASES {
            let resolved = normalize_location(alias).unwrap();
            assert_eq!(resolved.country().name(), *name, "alias {alias}");
            assert!(resolved.assumption_notice().is_none());
        }
    }

    #[test]
    fn test_aliases_point_at_canonical_names() {
        for (_, name) in ALIASES {
            assert!(canonical(name).is_some(), "{name} is not canonical");
        }
    }

    #[test]
    fn test_alias_keys_are_not_canonical_names() {
        for (alias, _) in ALIASES {
            assert!(canonical(alias).is_none(), "{alias} shadows a canonical name");
        }
    }

    #[test]
    fn test_common_aliases() {
        assert_eq!(normalize_location("uk").unwrap().country().name(), "united kingdom");
        assert_eq!(normalize_location("USA").unwrap().country().name(), "united states");
        assert_eq!(normalize_location(" us ").unwrap().country().name(), "united states");
    }

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        for country in COUNTRIES {
            let shouted = format!("  {}\t", country.name.to_uppercase());
            assert_eq!(
                normalize_location(&shouted).unwrap(),
                Resolution::Exact(*country)
            );
        }
    }

    #[test]
    fn test_morocco_uses_its_own_subdomain() {
        let country = normalize_location("Morocco").unwrap().country();
        assert_eq!(country.name(), "morocco");
        assert_eq!(country.indeed_base_url(), "https://ma.indeed.com");
    }

    #[test]
    fn test_unknown_location_lists_sorted_valid_set() {
        let err = normalize_location("xyz-not-a-country").unwrap_err();
        assert!(matches!(err, LocationError::Unknown { .. }));
        let valid = err.valid();
        assert!(!valid.is_empty());
        assert!(valid.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_atlantis_is_rejected() {
        assert!(normalize_location("Atlantis").is_err());
    }

    #[test]
    fn test_unique_fragment_is_assumed() {
        let resolved = normalize_location("argen").unwrap();
        assert_eq!(resolved.country().name(), "argentina");
        let notice = resolved.assumption_notice().unwrap();
        assert!(notice.contains("argentina"));
    }

    #[test]
    fn test_inner_fragment_is_assumed() {
        let resolved = normalize_location("zealand").unwrap();
        assert_eq!(resolved.country().name(), "new zealand");
    }

    #[test]
    fn test_ambiguous_fragment_fails() {
        let err = normalize_location("united").unwrap_err();
        match err {
            LocationError::Ambiguous { candidates, .. } => {
                assert_eq!(
                    candidates,
                    vec!["united arab emirates", "united kingdom", "united states"]
                );
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(normalize_location("land").is_err());
    }

    #[test]
    fn test_blank_location_fails() {
        assert!(normalize_location("   ").is_err());
    }
}
