//! Currency catalog
//!
//! A closed set of ISO-4217 currencies with the symbol used for display and a
//! human-readable name. Serialized as the three-letter code.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! currencies {
    ($($code:ident => ($symbol:literal, $name:literal)),+ $(,)?) => {
        /// Supported currencies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(clippy::upper_case_acronyms)]
        pub enum CurrencyType {
            $($code),+
        }

        impl CurrencyType {
            const ENTRIES: &'static [CurrencyType] = &[$(CurrencyType::$code),+];

            /// Every supported currency, in catalog order
            pub fn all() -> &'static [CurrencyType] {
                Self::ENTRIES
            }

            /// Three-letter ISO code
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code)),+
                }
            }

            /// Display symbol, e.g. `₹`
            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$code => $symbol),+
                }
            }

            /// Display name, e.g. `Indian Rupee`
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$code => $name),+
                }
            }
        }
    };
}

currencies! {
    USD => ("$", "United States Dollar"),
    EUR => ("€", "Euro"),
    GBP => ("£", "British Pound"),
    JPY => ("¥", "Japanese Yen"),
    CNY => ("¥", "Chinese Yuan"),
    INR => ("₹", "Indian Rupee"),
    AUD => ("A$", "Australian Dollar"),
    NZD => ("NZ$", "New Zealand Dollar"),
    SGD => ("S$", "Singapore Dollar"),
    HKD => ("HK$", "Hong Kong Dollar"),
    KRW => ("₩", "South Korean Won"),
    TWD => ("NT$", "Taiwan Dollar"),
    THB => ("฿", "Thai Baht"),
    MYR => ("RM", "Malaysian Ringgit"),
    IDR => ("Rp", "Indonesian Rupiah"),
    PHP => ("₱", "Philippine Peso"),
    VND => ("₫", "Vietnamese Dong"),
    PKR => ("₨", "Pakistani Rupee"),
    BDT => ("৳", "Bangladeshi Taka"),
    LKR => ("Rs", "Sri Lankan Rupee"),
    NPR => ("Rs", "Nepalese Rupee"),
    MMK => ("K", "Myanmar Kyat"),
    KHR => ("៛", "Cambodian Riel"),
    LAK => ("₭", "Lao Kip"),
    BND => ("B$", "Brunei Dollar"),
    MOP => ("MOP$", "Macau Pataca"),
    AFN => ("؋", "Afghan Afghani"),
    MVR => ("Rf", "Maldivian Rufiyaa"),
    CAD => ("C$", "Canadian Dollar"),
    MXN => ("$", "Mexican Peso"),
    BRL => ("R$", "Brazilian Real"),
    ARS => ("$", "Argentine Peso"),
    CLP => ("$", "Chilean Peso"),
    COP => ("$", "Colombian Peso"),
    PEN => ("S/", "Peruvian Sol"),
    VEF => ("Bs", "Venezuelan Bolívar"),
    UYU => ("$U", "Uruguayan Peso"),
    PYG => ("₲", "Paraguayan Guaraní"),
    BOB => ("Bs.", "Bolivian Boliviano"),
    CRC => ("₡", "Costa Rican Colón"),
    GTQ => ("Q", "Guatemalan Quetzal"),
    HNL => ("L", "Honduran Lempira"),
    NIO => ("C$", "Nicaraguan Córdoba"),
    PAB => ("B/.", "Panamanian Balboa"),
    DOP => ("RD$", "Dominican Peso"),
    CUP => ("$", "Cuban Peso"),
    JMD => ("J$", "Jamaican Dollar"),
    TTD => ("TT$", "Trinidad and Tobago Dollar"),
    BSD => ("B$", "Bahamian Dollar"),
    BBD => ("Bds$", "Barbadian Dollar"),
    BZD => ("BZ$", "Belize Dollar"),
    XCD => ("EC$", "East Caribbean Dollar"),
    CHF => ("Fr", "Swiss Franc"),
    SEK => ("kr", "Swedish Krona"),
    NOK => ("kr", "Norwegian Krone"),
    DKK => ("kr", "Danish Krone"),
    ISK => ("kr", "Icelandic Króna"),
    PLN => ("zł", "Polish Złoty"),
    CZK => ("Kč", "Czech Koruna"),
    HUF => ("Ft", "Hungarian Forint"),
    RON => ("lei", "Romanian Leu"),
    BGN => ("лв", "Bulgarian Lev"),
    HRK => ("kn", "Croatian Kuna"),
    RSD => ("din", "Serbian Dinar"),
    RUB => ("₽", "Russian Ruble"),
    UAH => ("₴", "Ukrainian Hryvnia"),
    BYN => ("Br", "Belarusian Ruble"),
    TRY => ("₺", "Turkish Lira"),
    GEL => ("₾", "Georgian Lari"),
    AMD => ("֏", "Armenian Dram"),
    AZN => ("₼", "Azerbaijani Manat"),
    MDL => ("L", "Moldovan Leu"),
    BAM => ("KM", "Bosnia-Herzegovina Mark"),
    MKD => ("ден", "Macedonian Denar"),
    ALL => ("L", "Albanian Lek"),
    AED => ("د.إ", "UAE Dirham"),
    SAR => ("ر.س", "Saudi Riyal"),
    QAR => ("ر.ق", "Qatari Riyal"),
    OMR => ("ر.ع.", "Omani Rial"),
    KWD => ("د.ك", "Kuwaiti Dinar"),
    BHD => ("د.ب", "Bahraini Dinar"),
    JOD => ("د.ا", "Jordanian Dinar"),
    LBP => ("ل.ل", "Lebanese Pound"),
    SYP => ("£S", "Syrian Pound"),
    IQD => ("ع.د", "Iraqi Dinar"),
    YER => ("﷼", "Yemeni Rial"),
    ILS => ("₪", "Israeli Shekel"),
    IRR => ("﷼", "Iranian Rial"),
    ZAR => ("R", "South African Rand"),
    EGP => ("E£", "Egyptian Pound"),
    NGN => ("₦", "Nigerian Naira"),
    KES => ("KSh", "Kenyan Shilling"),
    GHS => ("₵", "Ghanaian Cedi"),
    TZS => ("TSh", "Tanzanian Shilling"),
    UGX => ("USh", "Ugandan Shilling"),
    ETB => ("Br", "Ethiopian Birr"),
    MAD => ("د.م.", "Moroccan Dirham"),
    TND => ("د.ت", "Tunisian Dinar"),
    DZD => ("د.ج", "Algerian Dinar"),
    LYD => ("ل.د", "Libyan Dinar"),
    SDG => ("ج.س.", "Sudanese Pound"),
    SSP => ("£", "South Sudanese Pound"),
    MUR => ("₨", "Mauritian Rupee"),
    SCR => ("₨", "Seychellois Rupee"),
    MWK => ("MK", "Malawian Kwacha"),
    ZMW => ("ZK", "Zambian Kwacha"),
    BWP => ("P", "Botswana Pula"),
    NAD => ("N$", "Namibian Dollar"),
    SZL => ("L", "Swazi Lilangeni"),
    LSL => ("L", "Lesotho Loti"),
    AOA => ("Kz", "Angolan Kwanza"),
    MZN => ("MT", "Mozambican Metical"),
    RWF => ("FRw", "Rwandan Franc"),
    BIF => ("FBu", "Burundian Franc"),
    DJF => ("Fdj", "Djiboutian Franc"),
    SOS => ("Sh", "Somali Shilling"),
    GMD => ("D", "Gambian Dalasi"),
    SLL => ("Le", "Sierra Leonean Leone"),
    GNF => ("FG", "Guinean Franc"),
    LRD => ("L$", "Liberian Dollar"),
    CVE => ("$", "Cape Verdean Escudo"),
    XOF => ("CFA", "West African CFA Franc"),
    XAF => ("FCFA", "Central African CFA Franc"),
    FJD => ("FJ$", "Fijian Dollar"),
    PGK => ("K", "Papua New Guinean Kina"),
    WST => ("WS$", "Samoan Tālā"),
    TOP => ("T$", "Tongan Paʻanga"),
    VUV => ("VT", "Vanuatu Vatu"),
    SBD => ("SI$", "Solomon Islands Dollar"),
    XPF => ("₣", "CFP Franc"),
    KZT => ("₸", "Kazakhstani Tenge"),
    UZS => ("сўм", "Uzbekistani Som"),
    TJS => ("ЅМ", "Tajikistani Somoni"),
    KGS => ("с", "Kyrgyzstani Som"),
    TMT => ("m", "Turkmenistani Manat"),
    MNT => ("₮", "Mongolian Tögrög"),
}

impl CurrencyType {
    /// Look up a currency by code, ignoring case. Unknown codes fall back to USD.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::USD)
    }

    /// Currency used in a country, by ISO-3166 alpha-2 code
    pub fn for_country(country_code: &str) -> Option<Self> {
        match country_code.trim().to_ascii_uppercase().as_str() {
            "US" => Some(Self::USD),
            "GB" => Some(Self::GBP),
            "JP" => Some(Self::JPY),
            "CN" => Some(Self::CNY),
            "AT" | "BE" | "CY" | "EE" | "FI" | "FR" | "DE" | "GR" | "IE"
            | "IT" | "LV" | "LT" | "LU" | "MT" | "NL" | "PT" | "SK" | "SI"
            | "ES" => Some(Self::EUR),
            "IN" => Some(Self::INR),
            "AU" => Some(Self::AUD),
            "NZ" => Some(Self::NZD),
            "SG" => Some(Self::SGD),
            "HK" => Some(Self::HKD),
            "KR" => Some(Self::KRW),
            "TW" => Some(Self::TWD),
            "TH" => Some(Self::THB),
            "MY" => Some(Self::MYR),
            "ID" => Some(Self::IDR),
            "PH" => Some(Self::PHP),
            "VN" => Some(Self::VND),
            "PK" => Some(Self::PKR),
            "BD" => Some(Self::BDT),
            "LK" => Some(Self::LKR),
            "NP" => Some(Self::NPR),
            "MM" => Some(Self::MMK),
            "KH" => Some(Self::KHR),
            "LA" => Some(Self::LAK),
            "BN" => Some(Self::BND),
            "MO" => Some(Self::MOP),
            "AF" => Some(Self::AFN),
            "MV" => Some(Self::MVR),
            "MN" => Some(Self::MNT),
            "CA" => Some(Self::CAD),
            "MX" => Some(Self::MXN),
            "GT" => Some(Self::GTQ),
            "HN" => Some(Self::HNL),
            "NI" => Some(Self::NIO),
            "CR" => Some(Self::CRC),
            "PA" => Some(Self::PAB),
            "BZ" => Some(Self::BZD),
            "CU" => Some(Self::CUP),
            "DO" => Some(Self::DOP),
            "JM" => Some(Self::JMD),
            "TT" => Some(Self::TTD),
            "BS" => Some(Self::BSD),
            "BB" => Some(Self::BBD),
            "AG" | "DM" | "GD" | "KN" | "LC" | "VC" => Some(Self::XCD),
            "BR" => Some(Self::BRL),
            "AR" => Some(Self::ARS),
            "CL" => Some(Self::CLP),
            "CO" => Some(Self::COP),
            "PE" => Some(Self::PEN),
            "VE" => Some(Self::VEF),
            "UY" => Some(Self::UYU),
            "PY" => Some(Self::PYG),
            "BO" => Some(Self::BOB),
            "CH" => Some(Self::CHF),
            "SE" => Some(Self::SEK),
            "NO" => Some(Self::NOK),
            "DK" => Some(Self::DKK),
            "IS" => Some(Self::ISK),
            "PL" => Some(Self::PLN),
            "CZ" => Some(Self::CZK),
            "HU" => Some(Self::HUF),
            "RO" => Some(Self::RON),
            "BG" => Some(Self::BGN),
            "HR" => Some(Self::HRK),
            "RS" => Some(Self::RSD),
            "RU" => Some(Self::RUB),
            "UA" => Some(Self::UAH),
            "BY" => Some(Self::BYN),
            "TR" => Some(Self::TRY),
            "GE" => Some(Self::GEL),
            "AM" => Some(Self::AMD),
            "AZ" => Some(Self::AZN),
            "MD" => Some(Self::MDL),
            "BA" => Some(Self::BAM),
            "MK" => Some(Self::MKD),
            "AL" => Some(Self::ALL),
            "AE" => Some(Self::AED),
            "SA" => Some(Self::SAR),
            "QA" => Some(Self::QAR),
            "OM" => Some(Self::OMR),
            "KW" => Some(Self::KWD),
            "BH" => Some(Self::BHD),
            "JO" => Some(Self::JOD),
            "LB" => Some(Self::LBP),
            "SY" => Some(Self::SYP),
            "IQ" => Some(Self::IQD),
            "YE" => Some(Self::YER),
            "IL" => Some(Self::ILS),
            "IR" => Some(Self::IRR),
            "EG" => Some(Self::EGP),
            "MA" => Some(Self::MAD),
            "TN" => Some(Self::TND),
            "DZ" => Some(Self::DZD),
            "LY" => Some(Self::LYD),
            "SD" => Some(Self::SDG),
            "SS" => Some(Self::SSP),
            "ZA" => Some(Self::ZAR),
            "NG" => Some(Self::NGN),
            "KE" => Some(Self::KES),
            "GH" => Some(Self::GHS),
            "TZ" => Some(Self::TZS),
            "UG" => Some(Self::UGX),
            "ET" => Some(Self::ETB),
            "MU" => Some(Self::MUR),
            "SC" => Some(Self::SCR),
            "MW" => Some(Self::MWK),
            "ZM" => Some(Self::ZMW),
            "BW" => Some(Self::BWP),
            "NA" => Some(Self::NAD),
            "SZ" => Some(Self::SZL),
            "LS" => Some(Self::LSL),
            "AO" => Some(Self::AOA),
            "MZ" => Some(Self::MZN),
            "RW" => Some(Self::RWF),
            "BI" => Some(Self::BIF),
            "DJ" => Some(Self::DJF),
            "SO" => Some(Self::SOS),
            "GM" => Some(Self::GMD),
            "SL" => Some(Self::SLL),
            "GN" => Some(Self::GNF),
            "LR" => Some(Self::LRD),
            "CV" => Some(Self::CVE),
            "BJ" | "BF" | "CI" | "GW" | "ML" | "NE" | "SN" | "TG" => Some(Self::XOF),
            "CM" | "CF" | "TD" | "CG" | "GQ" | "GA" => Some(Self::XAF),
            "FJ" => Some(Self::FJD),
            "PG" => Some(Self::PGK),
            "WS" => Some(Self::WST),
            "TO" => Some(Self::TOP),
            "VU" => Some(Self::VUV),
            "SB" => Some(Self::SBD),
            "NC" | "PF" | "WF" => Some(Self::XPF),
            "KZ" => Some(Self::KZT),
            "UZ" => Some(Self::UZS),
            "TJ" => Some(Self::TJS),
            "KG" => Some(Self::KGS),
            "TM" => Some(Self::TMT),
            _ => None,
        }
    }
}

impl Default for CurrencyType {
    fn default() -> Self {
        Self::USD
    }
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

/// Error returned when a currency code is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown currency code: {}", self.0)
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for CurrencyType {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownCurrency(code.to_string()))
    }
}

impl Serialize for CurrencyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for CurrencyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(CurrencyType::from_code("inr"), CurrencyType::INR);
        assert_eq!(CurrencyType::from_code("Eur"), CurrencyType::EUR);
    }

    #[test]
    fn test_from_code_falls_back_to_usd() {
        assert_eq!(CurrencyType::from_code("XYZ"), CurrencyType::USD);
        assert_eq!(CurrencyType::from_code(""), CurrencyType::USD);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert!("XYZ".parse::<CurrencyType>().is_err());
        assert_eq!("gbp".parse::<CurrencyType>().unwrap(), CurrencyType::GBP);
    }

    #[test]
    fn test_catalog_metadata() {
        assert_eq!(CurrencyType::INR.symbol(), "₹");
        assert_eq!(CurrencyType::INR.name(), "Indian Rupee");
        assert_eq!(CurrencyType::ALL.code(), "ALL");
        assert_eq!(CurrencyType::UYU.symbol(), "$U");
        assert!(CurrencyType::all().len() > 100);
        assert_eq!(CurrencyType::all()[0], CurrencyType::USD);
    }

    #[test]
    fn test_for_country() {
        assert_eq!(CurrencyType::for_country("IN"), Some(CurrencyType::INR));
        assert_eq!(CurrencyType::for_country("de"), Some(CurrencyType::EUR));
        assert_eq!(CurrencyType::for_country("SN"), Some(CurrencyType::XOF));
        assert_eq!(CurrencyType::for_country("ZZ"), None);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&CurrencyType::JPY).unwrap();
        assert_eq!(json, "\"JPY\"");
        let parsed: CurrencyType = serde_json::from_str("\"jpy\"").unwrap();
        assert_eq!(parsed, CurrencyType::JPY);
        assert!(serde_json::from_str::<CurrencyType>("\"NOPE\"").is_err());
    }
}
