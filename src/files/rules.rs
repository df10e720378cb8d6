//! Device naming rules.
//!
//! Each rule pairs a predicate on the file stem with a way of building the new
//! name. Rules are tried in table order and the first match wins, which is what
//! separates overlapping shapes (an all-digit stem starting with "20" is a
//! camcorder clip, any other digit/dash stem is a phone export).

use chrono::NaiveDateTime;
use std::fmt;

use crate::errors::{RenamerError, Result};
use crate::media::{MediaKind, Property};

const DATE_LEN: usize = 8;
const TIME_LEN: usize = 6;
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Capture device families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Device {
    CamcorderA,
    CompactB,
    MirrorlessC,
    PhoneD,
}

impl Device {
    pub const ALL: [Device; 4] = [
        Device::CamcorderA,
        Device::CompactB,
        Device::MirrorlessC,
        Device::PhoneD,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Device::CamcorderA => "Camcorder-A",
            Device::CompactB => "Compact-B",
            Device::MirrorlessC => "Mirrorless-C",
            Device::PhoneD => "Phone-D",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a rule derives the new stem.
#[derive(Debug, Clone, Copy)]
pub enum NameSource {
    /// From the stem alone.
    Stem(fn(&str) -> Result<String>),
    /// `<timestamp> - <stem>`, with the timestamp read from the media file.
    Timestamp(fn(&str, MediaKind) -> Property),
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct DeviceRule {
    pub device: Device,
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub source: NameSource,
}

/// Classification table, in priority order.
pub static RULES: [DeviceRule; 5] = [
    DeviceRule {
        device: Device::CamcorderA,
        name: "camcorder",
        matches: is_camcorder,
        source: NameSource::Stem(camcorder_name),
    },
    DeviceRule {
        device: Device::CompactB,
        name: "compact",
        matches: is_compact,
        source: NameSource::Timestamp(|_, _| Property::DateTaken),
    },
    DeviceRule {
        device: Device::MirrorlessC,
        name: "mirrorless",
        matches: is_mirrorless,
        source: NameSource::Timestamp(mirrorless_property),
    },
    DeviceRule {
        device: Device::PhoneD,
        name: "phone-numeric",
        matches: is_phone_numeric,
        source: NameSource::Timestamp(|_, kind| match kind {
            MediaKind::Photo => Property::DateTaken,
            MediaKind::Video => Property::MediaCreated,
        }),
    },
    DeviceRule {
        device: Device::PhoneD,
        name: "phone-standard",
        matches: is_phone_standard,
        source: NameSource::Stem(phone_standard_name),
    },
];

/// First rule whose predicate accepts `stem`.
pub fn classify(stem: &str) -> Option<&'static DeviceRule> {
    RULES.iter().find(|rule| (rule.matches)(stem))
}

/// Already in `YYYYMMDD_HHMMSS...` form: 8 characters before the first
/// underscore and at least 6 in the segment after it.
pub fn is_smartphone_named(name: &str) -> bool {
    let mut parts = name.split('_');
    match (parts.next(), parts.next()) {
        (Some(date), Some(time)) => date.chars().count() == DATE_LEN && time.chars().count() >= TIME_LEN,
        _ => false,
    }
}

/// `<YYYYMMDD_HHMMSS> - <stem>`
pub fn timestamp_name(at: NaiveDateTime, stem: &str) -> String {
    format!("{} - {}", at.format(TIMESTAMP_FORMAT), stem)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_camcorder(stem: &str) -> bool {
    stem.starts_with("20") && all_digits(stem)
}

fn camcorder_name(stem: &str) -> Result<String> {
    if stem.len() < DATE_LEN {
        return Err(RenamerError::StemTooShort {
            name: stem.to_string(),
            min: DATE_LEN,
            found: stem.len(),
        });
    }
    Ok(format!(
        "{}_{} - {}",
        &stem[..DATE_LEN],
        &stem[DATE_LEN..],
        Device::CamcorderA.label()
    ))
}

fn is_compact(stem: &str) -> bool {
    let Some(rest) = stem.strip_prefix("IMG_") else {
        return false;
    };
    let b = rest.as_bytes();
    b.len() >= 4 && b[..4].iter().all(u8::is_ascii_digit) && !b.get(4).is_some_and(u8::is_ascii_digit)
}

fn is_mirrorless(stem: &str) -> bool {
    stem.starts_with("DSC") || stem.starts_with('C')
}

fn mirrorless_property(stem: &str, _: MediaKind) -> Property {
    if stem.starts_with("DSC") {
        Property::DateTaken
    } else {
        Property::DateEncoded
    }
}

fn is_phone_numeric(stem: &str) -> bool {
    !stem.is_empty() && !stem.starts_with("20") && stem.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}

/// `YYYYMMDD_HHMMSS` at the start of `s`.
fn has_embedded_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= DATE_LEN + 1 + TIME_LEN
        && b[..DATE_LEN].iter().all(u8::is_ascii_digit)
        && b[DATE_LEN] == b'_'
        && b[DATE_LEN + 1..DATE_LEN + 1 + TIME_LEN].iter().all(u8::is_ascii_digit)
}

fn is_phone_standard(stem: &str) -> bool {
    stem.strip_prefix("IMG_").is_some_and(has_embedded_date) || stem.starts_with("VID_")
}

fn phone_standard_name(stem: &str) -> Result<String> {
    Ok(format!("{} - {}", &stem[4..], stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rule_of(stem: &str) -> Option<&'static str> {
        classify(stem).map(|r| r.name)
    }

    fn stem_name(stem: &str) -> Result<String> {
        match classify(stem).unwrap().source {
            NameSource::Stem(build) => build(stem),
            NameSource::Timestamp(_) => panic!("{stem} needs a timestamp"),
        }
    }

    #[test]
    fn priority_order_resolves_overlaps() {
        assert_eq!(rule_of("20220806144753"), Some("camcorder"));
        assert_eq!(rule_of("IMG_4275"), Some("compact"));
        assert_eq!(rule_of("IMG_42751"), None);
        assert_eq!(rule_of("IMG_20220806_144753"), Some("phone-standard"));
        assert_eq!(rule_of("DSC01234"), Some("mirrorless"));
        assert_eq!(rule_of("C0042"), Some("mirrorless"));
        assert_eq!(rule_of("1659797273-001"), Some("phone-numeric"));
        assert_eq!(rule_of("VID_20220806_144753"), Some("phone-standard"));
        assert_eq!(rule_of("weird_name"), None);
        assert_eq!(rule_of(""), None);
    }

    #[test]
    fn short_digit_stems_starting_with_20_are_camcorder_clips() {
        assert_eq!(rule_of("2022"), Some("camcorder"));
        assert_eq!(rule_of("20220806"), Some("camcorder"));
        assert_eq!(stem_name("20220806").unwrap(), "20220806_ - Camcorder-A");
        let err = stem_name("2022").unwrap_err();
        assert!(matches!(err, RenamerError::StemTooShort { min: 8, found: 4, .. }));
    }

    #[test]
    fn camcorder_name_inserts_underscore() {
        assert_eq!(stem_name("20220806144753").unwrap(), "20220806_144753 - Camcorder-A");
        assert!(is_smartphone_named(&stem_name("20220806").unwrap()));
    }

    #[test]
    fn phone_standard_name_drops_prefix() {
        assert_eq!(
            stem_name("IMG_20220806_144753").unwrap(),
            "20220806_144753 - IMG_20220806_144753"
        );
        assert_eq!(
            stem_name("VID_20230101_000001").unwrap(),
            "20230101_000001 - VID_20230101_000001"
        );
    }

    #[test]
    fn embedded_date_shape_is_strict() {
        assert!(!is_phone_standard("IMG_2022080_1447531"));
        assert!(!is_phone_standard("IMG_20220806-144753"));
        assert!(is_phone_standard("IMG_20220806_144753_HDR"));
    }

    #[test]
    fn property_choice_follows_prefix_and_kind() {
        let NameSource::Timestamp(mirrorless) = RULES[2].source else { panic!() };
        assert_eq!(mirrorless("DSC0001", MediaKind::Photo), Property::DateTaken);
        assert_eq!(mirrorless("C0001", MediaKind::Video), Property::DateEncoded);
        let NameSource::Timestamp(phone) = RULES[3].source else { panic!() };
        assert_eq!(phone("123-456", MediaKind::Photo), Property::DateTaken);
        assert_eq!(phone("123-456", MediaKind::Video), Property::MediaCreated);
    }

    #[test]
    fn smartphone_shape() {
        assert!(is_smartphone_named("20220806_144753.jpg"));
        assert!(is_smartphone_named("20220806_144753 - Camcorder-A"));
        assert!(!is_smartphone_named("IMG_20220806_144753.jpg"));
        assert!(!is_smartphone_named("20220806_1447.jpg"));
        assert!(!is_smartphone_named("20220806144753"));
    }

    #[test]
    fn timestamp_name_format() {
        let at = NaiveDate::from_ymd_opt(2022, 8, 6).unwrap().and_hms_opt(14, 47, 53).unwrap();
        assert_eq!(timestamp_name(at, "IMG_4275"), "20220806_144753 - IMG_4275");
    }
}
