//! Country naming: Spanish official names for ISO 3166-1 codes, plus the
//! override table that reconciles the video tags with those names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One ISO 3166-1 entry with its Spanish official name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub numeric: u16,
    pub name: &'static str,
}

const fn c(alpha2: &'static str, alpha3: &'static str, numeric: u16, name: &'static str) -> Country {
    Country { alpha2, alpha3, numeric, name }
}

pub static COUNTRIES: &[Country] = &[
    c("AF", "AFG", 4, "Afganistán"),
    c("AX", "ALA", 248, "Islas Åland"),
    c("AL", "ALB", 8, "Albania"),
    c("DZ", "DZA", 12, "Argelia"),
    c("AS", "ASM", 16, "Samoa Americana"),
    c("AD", "AND", 20, "Andorra"),
    c("AO", "AGO", 24, "Angola"),
    c("AI", "AIA", 660, "Anguila"),
    c("AQ", "ATA", 10, "Antártida"),
    c("AG", "ATG", 28, "Antigua y Barbuda"),
    c("AR", "ARG", 32, "Argentina"),
    c("AM", "ARM", 51, "Armenia"),
    c("AW", "ABW", 533, "Aruba"),
    c("AU", "AUS", 36, "Australia"),
    c("AT", "AUT", 40, "Austria"),
    c("AZ", "AZE", 31, "Azerbaiyán"),
    c("BS", "BHS", 44, "Bahamas"),
    c("BH", "BHR", 48, "Bahrein"),
    c("BD", "BGD", 50, "Bangladesh"),
    c("BB", "BRB", 52, "Barbados"),
    c("BY", "BLR", 112, "Bielorrusia"),
    c("BE", "BEL", 56, "Bélgica"),
    c("BZ", "BLZ", 84, "Belice"),
    c("BJ", "BEN", 204, "Benin"),
    c("BM", "BMU", 60, "Bermudas"),
    c("BT", "BTN", 64, "Bután"),
    c("BO", "BOL", 68, "Bolivia"),
    c("BQ", "BES", 535, "Bonaire, San Eustaquio y Saba"),
    c("BA", "BIH", 70, "Bosnia y Herzegovina"),
    c("BW", "BWA", 72, "Botswana"),
    c("BV", "BVT", 74, "Isla Bouvet"),
    c("BR", "BRA", 76, "Brasil"),
    c("IO", "IOT", 86, "Territorio Británico del Océano Índico"),
    c("BN", "BRN", 96, "Brunei Darussalam"),
    c("BG", "BGR", 100, "Bulgaria"),
    c("BF", "BFA", 854, "Burkina Faso"),
    c("BI", "BDI", 108, "Burundi"),
    c("CV", "CPV", 132, "Cabo Verde"),
    c("KH", "KHM", 116, "Camboya"),
    c("CM", "CMR", 120, "Camerún"),
    c("CA", "CAN", 124, "Canadá"),
    c("KY", "CYM", 136, "Islas Caimán"),
    c("CF", "CAF", 140, "República Centroafricana"),
    c("TD", "TCD", 148, "Chad"),
    c("CL", "CHL", 152, "Chile"),
    c("CN", "CHN", 156, "China"),
    c("CX", "CXR", 162, "Isla de Navidad"),
    c("CC", "CCK", 166, "Islas Cocos"),
    c("CO", "COL", 170, "Colombia"),
    c("KM", "COM", 174, "Comoras"),
    c("CG", "COG", 178, "Congo"),
    c("CD", "COD", 180, "República Democrática del Congo"),
    c("CK", "COK", 184, "Islas Cook"),
    c("CR", "CRI", 188, "Costa Rica"),
    c("CI", "CIV", 384, "Costa de Marfil"),
    c("HR", "HRV", 191, "Croacia"),
    c("CU", "CUB", 192, "Cuba"),
    c("CW", "CUW", 531, "Curazao"),
    c("CY", "CYP", 196, "Chipre"),
    c("CZ", "CZE", 203, "República Checa"),
    c("DK", "DNK", 208, "Dinamarca"),
    c("DJ", "DJI", 262, "Yibuti"),
    c("DM", "DMA", 212, "Dominica"),
    c("DO", "DOM", 214, "República Dominicana"),
    c("EC", "ECU", 218, "Ecuador"),
    c("EG", "EGY", 818, "Egipto"),
    c("SV", "SLV", 222, "El Salvador"),
    c("GQ", "GNQ", 226, "Guinea Ecuatorial"),
    c("ER", "ERI", 232, "Eritrea"),
    c("EE", "EST", 233, "Estonia"),
    c("SZ", "SWZ", 748, "Esuatini"),
    c("ET", "ETH", 231, "Etiopía"),
    c("FK", "FLK", 238, "Islas Malvinas"),
    c("FO", "FRO", 234, "Islas Feroe"),
    c("FJ", "FJI", 242, "Fiji"),
    c("FI", "FIN", 246, "Finlandia"),
    c("FR", "FRA", 250, "Francia"),
    c("GF", "GUF", 254, "Guayana Francesa"),
    c("PF", "PYF", 258, "Polinesia Francesa"),
    c("TF", "ATF", 260, "Tierras Australes Francesas"),
    c("GA", "GAB", 266, "Gabón"),
    c("GM", "GMB", 270, "Gambia"),
    c("GE", "GEO", 268, "Georgia"),
    c("DE", "DEU", 276, "Alemania"),
    c("GH", "GHA", 288, "Ghana"),
    c("GI", "GIB", 292, "Gibraltar"),
    c("GR", "GRC", 300, "Grecia"),
    c("GL", "GRL", 304, "Groenlandia"),
    c("GD", "GRD", 308, "Granada"),
    c("GP", "GLP", 312, "Guadalupe"),
    c("GU", "GUM", 316, "Guam"),
    c("GT", "GTM", 320, "Guatemala"),
    c("GG", "GGY", 831, "Guernsey"),
    c("GN", "GIN", 324, "Guinea"),
    c("GW", "GNB", 624, "Guinea Bissau"),
    c("GY", "GUY", 328, "Guyana"),
    c("HT", "HTI", 332, "Haití"),
    c("HM", "HMD", 334, "Heard e Islas McDonald"),
    c("VA", "VAT", 336, "Santa Sede"),
    c("HN", "HND", 340, "Honduras"),
    c("HK", "HKG", 344, "Hong Kong"),
    c("HU", "HUN", 348, "Hungría"),
    c("IS", "ISL", 352, "Islandia"),
    c("IN", "IND", 356, "India"),
    c("ID", "IDN", 360, "Indonesia"),
    c("IR", "IRN", 364, "Irán"),
    c("IQ", "IRQ", 368, "Irak"),
    c("IE", "IRL", 372, "Irlanda"),
    c("IM", "IMN", 833, "Isla de Man"),
    c("IL", "ISR", 376, "Israel"),
    c("IT", "ITA", 380, "Italia"),
    c("JM", "JAM", 388, "Jamaica"),
    c("JP", "JPN", 392, "Japón"),
    c("JE", "JEY", 832, "Jersey"),
    c("JO", "JOR", 400, "Jordania"),
    c("KZ", "KAZ", 398, "Kazajistán"),
    c("KE", "KEN", 404, "Kenia"),
    c("KI", "KIR", 296, "Kiribati"),
    c("KP", "PRK", 408, "República Popular Democrática de Corea"),
    c("KR", "KOR", 410, "República de Corea"),
    c("KW", "KWT", 414, "Kuwait"),
    c("KG", "KGZ", 417, "Kirguistán"),
    c("LA", "LAO", 418, "República Democrática Popular Lao"),
    c("LV", "LVA", 428, "Letonia"),
    c("LB", "LBN", 422, "Líbano"),
    c("LS", "LSO", 426, "Lesoto"),
    c("LR", "LBR", 430, "Liberia"),
    c("LY", "LBY", 434, "Libia"),
    c("LI", "LIE", 438, "Liechtenstein"),
    c("LT", "LTU", 440, "Lituania"),
    c("LU", "LUX", 442, "Luxemburgo"),
    c("MO", "MAC", 446, "Macao"),
    c("MG", "MDG", 450, "Madagascar"),
    c("MW", "MWI", 454, "Malaui"),
    c("MY", "MYS", 458, "Malasia"),
    c("MV", "MDV", 462, "Maldivas"),
    c("ML", "MLI", 466, "Malí"),
    c("MT", "MLT", 470, "Malta"),
    c("MH", "MHL", 584, "Islas Marshall"),
    c("MQ", "MTQ", 474, "Martinica"),
    c("MR", "MRT", 478, "Mauritania"),
    c("MU", "MUS", 480, "Mauricio"),
    c("YT", "MYT", 175, "Mayotte"),
    c("MX", "MEX", 484, "México"),
    c("FM", "FSM", 583, "Micronesia"),
    c("MD", "MDA", 498, "Moldavia"),
    c("MC", "MCO", 492, "Mónaco"),
    c("MN", "MNG", 496, "Mongolia"),
    c("ME", "MNE", 499, "Montenegro"),
    c("MS", "MSR", 500, "Montserrat"),
    c("MA", "MAR", 504, "Marruecos"),
    c("MZ", "MOZ", 508, "Mozambique"),
    c("MM", "MMR", 104, "Myanmar"),
    c("NA", "NAM", 516, "Namibia"),
    c("NR", "NRU", 520, "Nauru"),
    c("NP", "NPL", 524, "Nepal"),
    c("NL", "NLD", 528, "Países Bajos"),
    c("NC", "NCL", 540, "Nueva Caledonia"),
    c("NZ", "NZL", 554, "Nueva Zelanda"),
    c("NI", "NIC", 558, "Nicaragua"),
    c("NE", "NER", 562, "Níger"),
    c("NG", "NGA", 566, "Nigeria"),
    c("NU", "NIU", 570, "Niue"),
    c("NF", "NFK", 574, "Isla Norfolk"),
    c("MK", "MKD", 807, "Macedonia del Norte"),
    c("MP", "MNP", 580, "Islas Marianas del Norte"),
    c("NO", "NOR", 578, "Noruega"),
    c("OM", "OMN", 512, "Omán"),
    c("PK", "PAK", 586, "Pakistán"),
    c("PW", "PLW", 585, "Palau"),
    c("PS", "PSE", 275, "Palestina"),
    c("PA", "PAN", 591, "Panamá"),
    c("PG", "PNG", 598, "Papúa Nueva Guinea"),
    c("PY", "PRY", 600, "Paraguay"),
    c("PE", "PER", 604, "Perú"),
    c("PH", "PHL", 608, "Filipinas"),
    c("PN", "PCN", 612, "Islas Pitcairn"),
    c("PL", "POL", 616, "Polonia"),
    c("PT", "PRT", 620, "Portugal"),
    c("PR", "PRI", 630, "Puerto Rico"),
    c("QA", "QAT", 634, "Qatar"),
    c("RE", "REU", 638, "Reunión"),
    c("RO", "ROU", 642, "Rumania"),
    c("RU", "RUS", 643, "Rusia"),
    c("RW", "RWA", 646, "Ruanda"),
    c("BL", "BLM", 652, "San Bartolomé"),
    c("SH", "SHN", 654, "Santa Helena, Ascensión y Tristán de Acuña"),
    c("KN", "KNA", 659, "San Cristóbal y Nieves"),
    c("LC", "LCA", 662, "Santa Lucía"),
    c("MF", "MAF", 663, "San Martín (parte francesa)"),
    c("PM", "SPM", 666, "San Pedro y Miquelón"),
    c("VC", "VCT", 670, "San Vicente y las Granadinas"),
    c("WS", "WSM", 882, "Samoa"),
    c("SM", "SMR", 674, "San Marino"),
    c("ST", "STP", 678, "Santo Tomé y Príncipe"),
    c("SA", "SAU", 682, "Arabia Saudita"),
    c("SN", "SEN", 686, "Senegal"),
    c("RS", "SRB", 688, "Serbia"),
    c("SC", "SYC", 690, "Seychelles"),
    c("SL", "SLE", 694, "Sierra Leona"),
    c("SG", "SGP", 702, "Singapur"),
    c("SX", "SXM", 534, "Sint Maarten (parte neerlandesa)"),
    c("SK", "SVK", 703, "Eslovaquia"),
    c("SI", "SVN", 705, "Eslovenia"),
    c("SB", "SLB", 90, "Islas Salomón"),
    c("SO", "SOM", 706, "Somalia"),
    c("ZA", "ZAF", 710, "Sudáfrica"),
    c("GS", "SGS", 239, "Georgia del Sur y las Islas Sandwich del Sur"),
    c("SS", "SSD", 728, "Sudán del Sur"),
    c("ES", "ESP", 724, "España"),
    c("LK", "LKA", 144, "Sri Lanka"),
    c("SD", "SDN", 729, "Sudán"),
    c("SR", "SUR", 740, "Surinam"),
    c("SJ", "SJM", 744, "Svalbard y Jan Mayen"),
    c("SE", "SWE", 752, "Suecia"),
    c("CH", "CHE", 756, "Suiza"),
    c("SY", "SYR", 760, "República Árabe Siria"),
    c("TW", "TWN", 158, "Taiwán"),
    c("TJ", "TJK", 762, "Tayikistán"),
    c("TZ", "TZA", 834, "Tanzania"),
    c("TH", "THA", 764, "Tailandia"),
    c("TL", "TLS", 626, "Timor Oriental"),
    c("TG", "TGO", 768, "Togo"),
    c("TK", "TKL", 772, "Tokelau"),
    c("TO", "TON", 776, "Tonga"),
    c("TT", "TTO", 780, "Trinidad y Tobago"),
    c("TN", "TUN", 788, "Túnez"),
    c("TR", "TUR", 792, "Turquía"),
    c("TM", "TKM", 795, "Turkmenistán"),
    c("TC", "TCA", 796, "Islas Turcas y Caicos"),
    c("TV", "TUV", 798, "Tuvalu"),
    c("UG", "UGA", 800, "Uganda"),
    c("UA", "UKR", 804, "Ucrania"),
    c("AE", "ARE", 784, "Emiratos Árabes Unidos"),
    c("GB", "GBR", 826, "Reino Unido"),
    c("US", "USA", 840, "Estados Unidos"),
    c("UM", "UMI", 581, "Islas Ultramarinas Menores de los Estados Unidos"),
    c("UY", "URY", 858, "Uruguay"),
    c("UZ", "UZB", 860, "Uzbekistán"),
    c("VU", "VUT", 548, "Vanuatu"),
    c("VE", "VEN", 862, "Venezuela"),
    c("VN", "VNM", 704, "Vietnam"),
    c("VG", "VGB", 92, "Islas Vírgenes Británicas"),
    c("VI", "VIR", 850, "Islas Vírgenes de los Estados Unidos"),
    c("WF", "WLF", 876, "Wallis y Futuna"),
    c("EH", "ESH", 732, "Sahara Occidental"),
    c("YE", "YEM", 887, "Yemen"),
    c("ZM", "ZMB", 894, "Zambia"),
    c("ZW", "ZWE", 716, "Zimbabue"),
];

static BY_NUMERIC: LazyLock<HashMap<u16, &'static Country>> =
    LazyLock::new(|| COUNTRIES.iter().map(|c| (c.numeric, c)).collect());

static BY_ALPHA: LazyLock<HashMap<&'static str, &'static Country>> = LazyLock::new(|| {
    let mut m = HashMap::with_capacity(COUNTRIES.len() * 2);
    for country in COUNTRIES {
        m.insert(country.alpha2, country);
        m.insert(country.alpha3, country);
    }
    m
});

/// Find a country by ISO 3166-1 numeric, alpha-2 or alpha-3 code.
///
/// Numeric codes may carry leading zeros ("004" and "4" both match).
/// Alphabetic codes are matched case-insensitively.
pub fn lookup_country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    if code.bytes().all(|b| b.is_ascii_digit()) {
        return code.parse::<u16>().ok().and_then(|n| BY_NUMERIC.get(&n).copied());
    }
    BY_ALPHA.get(code.to_ascii_uppercase().as_str()).copied()
}

/// Spanish official name for a feature code, or `fallback` when the code is unknown.
pub fn localized_name(code: &str, fallback: &str) -> String {
    lookup_country(code)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Map a country label from the video tags to the name used by the map.
pub fn normalize_country_name(country: &str) -> &str {
    match country {
        "Corea del Sur" => "República de Corea",
        "Corea del Norte" => "República Popular Democrática de Corea",
        _ => country,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_korea_overrides() {
        assert_eq!(normalize_country_name("Corea del Sur"), "República de Corea");
        assert_eq!(
            normalize_country_name("Corea del Norte"),
            "República Popular Democrática de Corea"
        );
    }

    #[test]
    fn test_normalize_is_identity_elsewhere() {
        for name in ["España", "México", "", "corea del sur", "Unknown"] {
            assert_eq!(normalize_country_name(name), name);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["Corea del Sur", "Corea del Norte", "Japón"] {
            let once = normalize_country_name(name);
            assert_eq!(normalize_country_name(once), once);
        }
    }

    #[test]
    fn test_lookup_by_any_code() {
        let by_numeric = lookup_country("410").unwrap();
        assert_eq!(by_numeric.alpha2, "KR");
        assert_eq!(lookup_country("kr"), Some(by_numeric));
        assert_eq!(lookup_country("KOR"), Some(by_numeric));
    }

    #[test]
    fn test_lookup_numeric_with_leading_zeros() {
        assert_eq!(lookup_country("004").map(|c| c.alpha2), Some("AF"));
        assert_eq!(lookup_country("4").map(|c| c.alpha2), Some("AF"));
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup_country("").is_none());
        assert!(lookup_country("Unknown").is_none());
        assert!(lookup_country("-99").is_none());
        assert!(lookup_country("999").is_none());
    }

    #[test]
    fn test_localized_name_matches_korea_overrides() {
        assert_eq!(localized_name("410", "South Korea"), normalize_country_name("Corea del Sur"));
        assert_eq!(localized_name("408", "North Korea"), normalize_country_name("Corea del Norte"));
    }

    #[test]
    fn test_localized_name_fallback() {
        assert_eq!(localized_name("Unknown", "Kosovo"), "Kosovo");
        assert_eq!(localized_name("724", "Spain"), "España");
    }

    #[test]
    fn test_table_codes_are_unique() {
        let numerics: HashSet<u16> = COUNTRIES.iter().map(|c| c.numeric).collect();
        let alpha2: HashSet<&str> = COUNTRIES.iter().map(|c| c.alpha2).collect();
        let alpha3: HashSet<&str> = COUNTRIES.iter().map(|c| c.alpha3).collect();
        assert_eq!(numerics.len(), COUNTRIES.len());
        assert_eq!(alpha2.len(), COUNTRIES.len());
        assert_eq!(alpha3.len(), COUNTRIES.len());
    }
}
