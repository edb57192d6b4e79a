//! Static country pools, one per level.
//!
//! Earlier levels hold the most widely recognised flags. Only the first
//! `questions_per_level` entries of a shuffled pool are asked per playthrough;
//! the rest give a retry a fresh draw.

use crate::model::{Country, Level};

/// Countries per level pool.
pub const POOL_SIZE: usize = 20;

/// `(name, region code)` pairs, indexed by `Level::index()`.
static LEVEL_TABLE: [[(&str, &str); POOL_SIZE]; Level::COUNT] = [
    // Level 1
    [
        ("France", "fr"),
        ("Germany", "de"),
        ("Japan", "jp"),
        ("Brazil", "br"),
        ("Canada", "ca"),
        ("India", "in"),
        ("Italy", "it"),
        ("Mexico", "mx"),
        ("Australia", "au"),
        ("United States", "us"),
        ("Spain", "es"),
        ("United Kingdom", "gb"),
        ("China", "cn"),
        ("South Korea", "kr"),
        ("Argentina", "ar"),
        ("Netherlands", "nl"),
        ("Sweden", "se"),
        ("Norway", "no"),
        ("Switzerland", "ch"),
        ("Portugal", "pt"),
    ],
    // Level 2
    [
        ("Thailand", "th"),
        ("Vietnam", "vn"),
        ("Indonesia", "id"),
        ("Philippines", "ph"),
        ("Turkey", "tr"),
        ("Greece", "gr"),
        ("Poland", "pl"),
        ("Finland", "fi"),
        ("Ireland", "ie"),
        ("Belgium", "be"),
        ("Austria", "at"),
        ("Denmark", "dk"),
        ("Czech Republic", "cz"),
        ("Hungary", "hu"),
        ("Romania", "ro"),
        ("Bulgaria", "bg"),
        ("Croatia", "hr"),
        ("Ukraine", "ua"),
        ("Serbia", "rs"),
        ("Chile", "cl"),
    ],
    // Level 3
    [
        ("Colombia", "co"),
        ("Peru", "pe"),
        ("Malaysia", "my"),
        ("Singapore", "sg"),
        ("New Zealand", "nz"),
        ("Morocco", "ma"),
        ("Egypt", "eg"),
        ("Kenya", "ke"),
        ("Nigeria", "ng"),
        ("South Africa", "za"),
        ("Saudi Arabia", "sa"),
        ("Israel", "il"),
        ("Pakistan", "pk"),
        ("Bangladesh", "bd"),
        ("Sri Lanka", "lk"),
        ("Nepal", "np"),
        ("Jordan", "jo"),
        ("Qatar", "qa"),
        ("Panama", "pa"),
        ("Paraguay", "py"),
    ],
    // Level 4
    [
        ("Afghanistan", "af"),
        ("Albania", "al"),
        ("Algeria", "dz"),
        ("Armenia", "am"),
        ("Azerbaijan", "az"),
        ("Belarus", "by"),
        ("Bolivia", "bo"),
        ("North Macedonia", "mk"),
        ("Cambodia", "kh"),
        ("Costa Rica", "cr"),
        ("El Salvador", "sv"),
        ("Ecuador", "ec"),
        ("Ethiopia", "et"),
        ("Georgia", "ge"),
        ("Ghana", "gh"),
        ("Guatemala", "gt"),
        ("Honduras", "hn"),
        ("Jamaica", "jm"),
        ("Kazakhstan", "kz"),
        ("Kuwait", "kw"),
    ],
    // Level 5
    [
        ("Laos", "la"),
        ("Lebanon", "lb"),
        ("Lithuania", "lt"),
        ("Madagascar", "mg"),
        ("Mongolia", "mn"),
        ("Bahrain", "bh"),
        ("Oman", "om"),
        ("Tunisia", "tn"),
        ("Uruguay", "uy"),
        ("Venezuela", "ve"),
        ("Yemen", "ye"),
        ("Zimbabwe", "zw"),
        ("Estonia", "ee"),
        ("Latvia", "lv"),
        ("Malta", "mt"),
        ("Iceland", "is"),
        ("Luxembourg", "lu"),
        ("Slovakia", "sk"),
        ("Slovenia", "si"),
        ("Cyprus", "cy"),
    ],
];

/// The fixed, ordered set of countries in play for a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPool {
    level: Level,
    countries: Vec<Country>,
}

impl LevelPool {
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        let countries = LEVEL_TABLE[level.index()]
            .iter()
            .map(|(name, code)| Country::from_table(name, code))
            .collect();
        Self { level, countries }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    #[must_use]
    pub fn into_countries(self) -> Vec<Country> {
        self.countries
    }
}
