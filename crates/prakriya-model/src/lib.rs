pub mod enums;
pub mod error;
pub mod sounds;
pub mod term;
pub mod upadesha;

pub use enums::{Lakshana, Marker, Op, Tag};
pub use error::{ModelError, Result};
pub use sounds::{Pratyahara, Sound, SoundClass, Varga};
pub use term::{RuleId, Term};
pub use upadesha::{Upadesha, UpadeshaKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dhatu_is_an_anga() {
        let term = Term::dhatu("BU");
        assert!(term.has_tag(Tag::Dhatu));
        assert!(term.has_tag(Tag::Anga));
        assert_eq!(term.to_string(), "BU");
    }

    #[test]
    fn vibhakti_carries_its_markers() {
        let term = Term::vibhakti("Ral").with_lakshana([Lakshana::LiW]);
        assert_eq!(term.value(), "a");
        assert!(term.any_marker(&[Marker::Nyit, Marker::Nnit]));
        assert!(term.has_tag(Tag::Tin));
        assert!(term.has_lakshana(Lakshana::LiW));
    }
}
