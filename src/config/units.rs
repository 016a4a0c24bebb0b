//! Unit conversions to seconds, atoms and plain fractions

/// Avogadro constant (atoms per mol)
pub const AVOGADRO: f64 = 6.0221408e23;

/// Seconds per Julian year
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;

/// Time units accepted in input files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Year,
}

impl TimeUnit {
    pub const SYMBOLS: [&'static str; 5] = ["s", "m", "h", "d", "y"];

    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "s" => Some(Self::Second),
            "m" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            "y" => Some(Self::Year),
            _ => None,
        }
    }

    /// Length of one unit in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3600.0,
            Self::Day => 86_400.0,
            Self::Year => SECONDS_PER_YEAR,
        }
    }
}

/// Count units: bare atoms or moles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUnit {
    Atoms,
    Mole,
}

impl CountUnit {
    pub const SYMBOLS: [&'static str; 2] = ["", "mol"];

    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "" => Some(Self::Atoms),
            "mol" => Some(Self::Mole),
            _ => None,
        }
    }

    pub fn atoms(&self) -> f64 {
        match self {
            Self::Atoms => 1.0,
            Self::Mole => AVOGADRO,
        }
    }
}

/// Ratio units: plain fraction or percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioUnit {
    Fraction,
    Percent,
}

impl RatioUnit {
    pub const SYMBOLS: [&'static str; 2] = ["", "%"];

    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "" => Some(Self::Fraction),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Self::Fraction => 1.0,
            Self::Percent => 0.01,
        }
    }
}
