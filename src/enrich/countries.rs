//! Built-in reference country data with fuzzy name matching.
//!
//! Serves three lookups: free-text country → canonical country, ISO
//! numeric code → currency name, and country name → capital city.

use super::LookupError;
use serde::Serialize;

/// A canonical country as returned by a [`CountryMatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryId {
    pub alpha2: String,
    pub numeric: u16,
    pub name: String,
}

/// Maps free-text country names to a canonical country.
pub trait CountryMatcher: Send + Sync {
    fn match_country(&self, text: &str) -> Result<Option<CountryId>, LookupError>;
}

/// Maps an ISO 3166 numeric country code to a currency display name.
pub trait CurrencyDirectory: Send + Sync {
    fn currency_for(&self, numeric: u16) -> Result<Option<String>, LookupError>;
}

/// Maps a country name to its capital city.
pub trait CapitalDirectory: Send + Sync {
    fn capital_of(&self, country: &str) -> Result<Option<String>, LookupError>;
}

// ─── Built-in dataset ───────────────────────────────────────────

struct CountryData {
    alpha2: &'static str,
    numeric: u16,
    name: &'static str,
    aliases: &'static [&'static str],
    capital: &'static str,
    currency: &'static str,
}

const fn country(
    alpha2: &'static str,
    numeric: u16,
    name: &'static str,
    aliases: &'static [&'static str],
    capital: &'static str,
    currency: &'static str,
) -> CountryData {
    CountryData { alpha2, numeric, name, aliases, capital, currency }
}

#[rustfmt::skip]
const COUNTRIES: &[CountryData] = &[
    country("AF", 4, "Afghanistan", &[], "Kabul", "Afghani"),
    country("AL", 8, "Albania", &["shqiperia"], "Tirana", "Lek"),
    country("DZ", 12, "Algeria", &["algerie"], "Algiers", "Algerian Dinar"),
    country("AD", 20, "Andorra", &[], "Andorra la Vella", "Euro"),
    country("AO", 24, "Angola", &[], "Luanda", "Kwanza"),
    country("AG", 28, "Antigua and Barbuda", &[], "Saint John's", "East Caribbean Dollar"),
    country("AR", 32, "Argentina", &[], "Buenos Aires", "Argentine Peso"),
    country("AM", 51, "Armenia", &["hayastan"], "Yerevan", "Armenian Dram"),
    country("AU", 36, "Australia", &[], "Canberra", "Australian Dollar"),
    country("AT", 40, "Austria", &["osterreich"], "Vienna", "Euro"),
    country("AZ", 31, "Azerbaijan", &["azerbaycan"], "Baku", "Azerbaijan Manat"),
    country("BS", 44, "Bahamas", &["the bahamas"], "Nassau", "Bahamian Dollar"),
    country("BH", 48, "Bahrain", &[], "Manama", "Bahraini Dinar"),
    country("BD", 50, "Bangladesh", &[], "Dhaka", "Taka"),
    country("BB", 52, "Barbados", &[], "Bridgetown", "Barbados Dollar"),
    country("BY", 112, "Belarus", &["belarus'", "byelorussia"], "Minsk", "Belarusian Ruble"),
    country("BE", 56, "Belgium", &["belgique", "belgie", "belgien"], "Brussels", "Euro"),
    country("BZ", 84, "Belize", &[], "Belmopan", "Belize Dollar"),
    country("BJ", 204, "Benin", &[], "Porto-Novo", "CFA Franc BCEAO"),
    country("BT", 64, "Bhutan", &[], "Thimphu", "Ngultrum"),
    country("BO", 68, "Bolivia", &["plurinational state of bolivia"], "Sucre", "Boliviano"),
    country("BA", 70, "Bosnia and Herzegovina", &["bosna i hercegovina"], "Sarajevo", "Convertible Mark"),
    country("BW", 72, "Botswana", &[], "Gaborone", "Pula"),
    country("BR", 76, "Brazil", &["brasil"], "Brasília", "Brazilian Real"),
    country("BN", 96, "Brunei", &["brunei darussalam"], "Bandar Seri Begawan", "Brunei Dollar"),
    country("BG", 100, "Bulgaria", &["balgariya"], "Sofia", "Euro"),
    country("BF", 854, "Burkina Faso", &[], "Ouagadougou", "CFA Franc BCEAO"),
    country("BI", 108, "Burundi", &[], "Gitega", "Burundi Franc"),
    country("CV", 132, "Cabo Verde", &["cape verde"], "Praia", "Cabo Verde Escudo"),
    country("KH", 116, "Cambodia", &["kampuchea"], "Phnom Penh", "Riel"),
    country("CM", 120, "Cameroon", &["cameroun"], "Yaoundé", "CFA Franc BEAC"),
    country("CA", 124, "Canada", &[], "Ottawa", "Canadian Dollar"),
    country("CF", 140, "Central African Republic", &["centrafrique"], "Bangui", "CFA Franc BEAC"),
    country("TD", 148, "Chad", &["tchad"], "N'Djamena", "CFA Franc BEAC"),
    country("CL", 152, "Chile", &[], "Santiago", "Chilean Peso"),
    country("CN", 156, "China", &["people's republic of china", "zhongguo", "中国"], "Beijing", "Yuan Renminbi"),
    country("CO", 170, "Colombia", &[], "Bogotá", "Colombian Peso"),
    country("KM", 174, "Comoros", &["comores"], "Moroni", "Comorian Franc"),
    country("CG", 178, "Congo", &["republic of the congo", "congo-brazzaville"], "Brazzaville", "CFA Franc BEAC"),
    country("CD", 180, "Democratic Republic of the Congo", &["dr congo", "congo-kinshasa", "drc"], "Kinshasa", "Congolese Franc"),
    country("CR", 188, "Costa Rica", &[], "San José", "Costa Rican Colon"),
    country("CI", 384, "Côte d'Ivoire", &["ivory coast", "cote d'ivoire"], "Yamoussoukro", "CFA Franc BCEAO"),
    country("HR", 191, "Croatia", &["hrvatska"], "Zagreb", "Euro"),
    country("CU", 192, "Cuba", &[], "Havana", "Cuban Peso"),
    country("CY", 196, "Cyprus", &["kypros", "kibris"], "Nicosia", "Euro"),
    country("CZ", 203, "Czechia", &["czech republic", "cesko", "ceska republika"], "Prague", "Czech Koruna"),
    country("DK", 208, "Denmark", &["danmark"], "Copenhagen", "Danish Krone"),
    country("DJ", 262, "Djibouti", &[], "Djibouti", "Djibouti Franc"),
    country("DM", 212, "Dominica", &[], "Roseau", "East Caribbean Dollar"),
    country("DO", 214, "Dominican Republic", &["republica dominicana"], "Santo Domingo", "Dominican Peso"),
    country("EC", 218, "Ecuador", &[], "Quito", "US Dollar"),
    country("EG", 818, "Egypt", &["misr"], "Cairo", "Egyptian Pound"),
    country("SV", 222, "El Salvador", &[], "San Salvador", "US Dollar"),
    country("GQ", 226, "Equatorial Guinea", &["guinea ecuatorial"], "Malabo", "CFA Franc BEAC"),
    country("ER", 232, "Eritrea", &[], "Asmara", "Nakfa"),
    country("EE", 233, "Estonia", &["eesti"], "Tallinn", "Euro"),
    country("SZ", 748, "Eswatini", &["swaziland"], "Mbabane", "Lilangeni"),
    country("ET", 231, "Ethiopia", &[], "Addis Ababa", "Ethiopian Birr"),
    country("FJ", 242, "Fiji", &[], "Suva", "Fiji Dollar"),
    country("FI", 246, "Finland", &["suomi"], "Helsinki", "Euro"),
    country("FR", 250, "France", &["french republic"], "Paris", "Euro"),
    country("GA", 266, "Gabon", &[], "Libreville", "CFA Franc BEAC"),
    country("GM", 270, "Gambia", &["the gambia"], "Banjul", "Dalasi"),
    country("GE", 268, "Georgia", &["sakartvelo"], "Tbilisi", "Lari"),
    country("DE", 276, "Germany", &["deutschland", "allemagne", "alemanha"], "Berlin", "Euro"),
    country("GH", 288, "Ghana", &[], "Accra", "Ghana Cedi"),
    country("GR", 300, "Greece", &["hellas", "ellada", "ελλάδα"], "Athens", "Euro"),
    country("GL", 304, "Greenland", &["kalaallit nunaat", "gronland"], "Nuuk", "Danish Krone"),
    country("GD", 308, "Grenada", &[], "Saint George's", "East Caribbean Dollar"),
    country("GT", 320, "Guatemala", &[], "Guatemala City", "Quetzal"),
    country("GN", 324, "Guinea", &["guinee"], "Conakry", "Guinean Franc"),
    country("GW", 624, "Guinea-Bissau", &["guine-bissau"], "Bissau", "CFA Franc BCEAO"),
    country("GY", 328, "Guyana", &[], "Georgetown", "Guyana Dollar"),
    country("HT", 332, "Haiti", &["ayiti"], "Port-au-Prince", "Gourde"),
    country("HN", 340, "Honduras", &[], "Tegucigalpa", "Lempira"),
    country("HU", 348, "Hungary", &["magyarorszag"], "Budapest", "Forint"),
    country("IS", 352, "Iceland", &[], "Reykjavik", "Iceland Krona"),
    country("IN", 356, "India", &["bharat"], "New Delhi", "Indian Rupee"),
    country("ID", 360, "Indonesia", &[], "Jakarta", "Rupiah"),
    country("IR", 364, "Iran", &["islamic republic of iran"], "Tehran", "Iranian Rial"),
    country("IQ", 368, "Iraq", &[], "Baghdad", "Iraqi Dinar"),
    country("IE", 372, "Ireland", &["eire", "republic of ireland"], "Dublin", "Euro"),
    country("IL", 376, "Israel", &[], "Jerusalem", "New Israeli Sheqel"),
    country("IT", 380, "Italy", &["italia"], "Rome", "Euro"),
    country("JM", 388, "Jamaica", &[], "Kingston", "Jamaican Dollar"),
    country("JP", 392, "Japan", &["nippon", "nihon", "日本"], "Tokyo", "Yen"),
    country("JO", 400, "Jordan", &[], "Amman", "Jordanian Dinar"),
    country("KZ", 398, "Kazakhstan", &["qazaqstan"], "Astana", "Tenge"),
    country("KE", 404, "Kenya", &[], "Nairobi", "Kenyan Shilling"),
    country("KI", 296, "Kiribati", &[], "South Tarawa", "Australian Dollar"),
    country("KP", 408, "North Korea", &["democratic people's republic of korea", "dprk"], "Pyongyang", "North Korean Won"),
    country("KR", 410, "South Korea", &["republic of korea", "korea", "hanguk"], "Seoul", "Won"),
    country("KW", 414, "Kuwait", &[], "Kuwait City", "Kuwaiti Dinar"),
    country("KG", 417, "Kyrgyzstan", &["kyrgyz republic"], "Bishkek", "Som"),
    country("LA", 418, "Laos", &["lao people's democratic republic"], "Vientiane", "Lao Kip"),
    country("LV", 428, "Latvia", &["latvija"], "Riga", "Euro"),
    country("LB", 422, "Lebanon", &["liban"], "Beirut", "Lebanese Pound"),
    country("LS", 426, "Lesotho", &[], "Maseru", "Loti"),
    country("LR", 430, "Liberia", &[], "Monrovia", "Liberian Dollar"),
    country("LY", 434, "Libya", &[], "Tripoli", "Libyan Dinar"),
    country("LI", 438, "Liechtenstein", &[], "Vaduz", "Swiss Franc"),
    country("LT", 440, "Lithuania", &["lietuva"], "Vilnius", "Euro"),
    country("LU", 442, "Luxembourg", &["letzebuerg", "luxemburg"], "Luxembourg", "Euro"),
    country("MG", 450, "Madagascar", &[], "Antananarivo", "Malagasy Ariary"),
    country("MW", 454, "Malawi", &[], "Lilongwe", "Malawi Kwacha"),
    country("MY", 458, "Malaysia", &[], "Kuala Lumpur", "Malaysian Ringgit"),
    country("MV", 462, "Maldives", &[], "Malé", "Rufiyaa"),
    country("ML", 466, "Mali", &[], "Bamako", "CFA Franc BCEAO"),
    country("MT", 470, "Malta", &[], "Valletta", "Euro"),
    country("MH", 584, "Marshall Islands", &[], "Majuro", "US Dollar"),
    country("MR", 478, "Mauritania", &["mauritanie"], "Nouakchott", "Ouguiya"),
    country("MU", 480, "Mauritius", &["maurice"], "Port Louis", "Mauritius Rupee"),
    country("MX", 484, "Mexico", &["estados unidos mexicanos"], "Mexico City", "Mexican Peso"),
    country("FM", 583, "Micronesia", &["federated states of micronesia"], "Palikir", "US Dollar"),
    country("MD", 498, "Moldova", &["republic of moldova"], "Chișinău", "Moldovan Leu"),
    country("MC", 492, "Monaco", &[], "Monaco", "Euro"),
    country("MN", 496, "Mongolia", &["mongol uls"], "Ulaanbaatar", "Tugrik"),
    country("ME", 499, "Montenegro", &["crna gora"], "Podgorica", "Euro"),
    country("MA", 504, "Morocco", &["maroc", "marrocos"], "Rabat", "Moroccan Dirham"),
    country("MZ", 508, "Mozambique", &["mocambique"], "Maputo", "Mozambique Metical"),
    country("MM", 104, "Myanmar", &["burma"], "Naypyidaw", "Kyat"),
    country("NA", 516, "Namibia", &[], "Windhoek", "Namibia Dollar"),
    country("NR", 520, "Nauru", &[], "Yaren", "Australian Dollar"),
    country("NP", 524, "Nepal", &[], "Kathmandu", "Nepalese Rupee"),
    country("NL", 528, "Netherlands", &["nederland", "holland", "the netherlands"], "Amsterdam", "Euro"),
    country("NZ", 554, "New Zealand", &["aotearoa"], "Wellington", "New Zealand Dollar"),
    country("NI", 558, "Nicaragua", &[], "Managua", "Cordoba Oro"),
    country("NE", 562, "Niger", &[], "Niamey", "CFA Franc BCEAO"),
    country("NG", 566, "Nigeria", &[], "Abuja", "Naira"),
    country("MK", 807, "North Macedonia", &["macedonia", "severna makedonija"], "Skopje", "Denar"),
    country("NO", 578, "Norway", &["norge", "noreg"], "Oslo", "Norwegian Krone"),
    country("OM", 512, "Oman", &[], "Muscat", "Rial Omani"),
    country("PK", 586, "Pakistan", &[], "Islamabad", "Pakistan Rupee"),
    country("PW", 585, "Palau", &[], "Ngerulmud", "US Dollar"),
    country("PS", 275, "Palestine", &["state of palestine", "palestinian territory"], "Ramallah", "New Israeli Sheqel"),
    country("PA", 591, "Panama", &[], "Panama City", "Balboa"),
    country("PG", 598, "Papua New Guinea", &[], "Port Moresby", "Kina"),
    country("PY", 600, "Paraguay", &[], "Asunción", "Guarani"),
    country("PE", 604, "Peru", &[], "Lima", "Sol"),
    country("PH", 608, "Philippines", &["pilipinas"], "Manila", "Philippine Peso"),
    country("PL", 616, "Poland", &["polska"], "Warsaw", "Zloty"),
    country("PT", 620, "Portugal", &["portuguese republic", "republica portuguesa"], "Lisbon", "Euro"),
    country("PR", 630, "Puerto Rico", &[], "San Juan", "US Dollar"),
    country("QA", 634, "Qatar", &[], "Doha", "Qatari Rial"),
    country("RO", 642, "Romania", &[], "Bucharest", "Romanian Leu"),
    country("RU", 643, "Russia", &["russian federation", "rossiya", "россия"], "Moscow", "Russian Ruble"),
    country("RW", 646, "Rwanda", &[], "Kigali", "Rwanda Franc"),
    country("KN", 659, "Saint Kitts and Nevis", &["st kitts and nevis"], "Basseterre", "East Caribbean Dollar"),
    country("LC", 662, "Saint Lucia", &["st lucia"], "Castries", "East Caribbean Dollar"),
    country("VC", 670, "Saint Vincent and the Grenadines", &["st vincent and the grenadines"], "Kingstown", "East Caribbean Dollar"),
    country("WS", 882, "Samoa", &[], "Apia", "Tala"),
    country("SM", 674, "San Marino", &[], "San Marino", "Euro"),
    country("ST", 678, "Sao Tome and Principe", &["são tomé e príncipe"], "São Tomé", "Dobra"),
    country("SA", 682, "Saudi Arabia", &["kingdom of saudi arabia", "ksa"], "Riyadh", "Saudi Riyal"),
    country("SN", 686, "Senegal", &[], "Dakar", "CFA Franc BCEAO"),
    country("RS", 688, "Serbia", &["srbija", "србија"], "Belgrade", "Serbian Dinar"),
    country("SC", 690, "Seychelles", &[], "Victoria", "Seychelles Rupee"),
    country("SL", 694, "Sierra Leone", &[], "Freetown", "Leone"),
    country("SG", 702, "Singapore", &[], "Singapore", "Singapore Dollar"),
    country("SK", 703, "Slovakia", &["slovensko", "slovak republic"], "Bratislava", "Euro"),
    country("SI", 705, "Slovenia", &["slovenija"], "Ljubljana", "Euro"),
    country("SB", 90, "Solomon Islands", &[], "Honiara", "Solomon Islands Dollar"),
    country("SO", 706, "Somalia", &["soomaaliya"], "Mogadishu", "Somali Shilling"),
    country("ZA", 710, "South Africa", &[], "Pretoria", "Rand"),
    country("SS", 728, "South Sudan", &[], "Juba", "South Sudanese Pound"),
    country("ES", 724, "Spain", &["espana", "espanha"], "Madrid", "Euro"),
    country("LK", 144, "Sri Lanka", &[], "Sri Jayawardenepura Kotte", "Sri Lanka Rupee"),
    country("SD", 729, "Sudan", &[], "Khartoum", "Sudanese Pound"),
    country("SR", 740, "Suriname", &[], "Paramaribo", "Surinam Dollar"),
    country("SE", 752, "Sweden", &["sverige"], "Stockholm", "Swedish Krona"),
    country("CH", 756, "Switzerland", &["schweiz", "suisse", "svizzera", "suica"], "Bern", "Swiss Franc"),
    country("SY", 760, "Syria", &["syrian arab republic"], "Damascus", "Syrian Pound"),
    country("TW", 158, "Taiwan", &[], "Taipei", "New Taiwan Dollar"),
    country("TJ", 762, "Tajikistan", &[], "Dushanbe", "Somoni"),
    country("TZ", 834, "Tanzania", &["united republic of tanzania"], "Dodoma", "Tanzanian Shilling"),
    country("TH", 764, "Thailand", &[], "Bangkok", "Baht"),
    country("TL", 626, "Timor-Leste", &["east timor"], "Dili", "US Dollar"),
    country("TG", 768, "Togo", &[], "Lomé", "CFA Franc BCEAO"),
    country("TO", 776, "Tonga", &[], "Nuku'alofa", "Pa'anga"),
    country("TT", 780, "Trinidad and Tobago", &[], "Port of Spain", "Trinidad and Tobago Dollar"),
    country("TN", 788, "Tunisia", &["tunisie"], "Tunis", "Tunisian Dinar"),
    country("TR", 792, "Turkey", &["turkiye"], "Ankara", "Turkish Lira"),
    country("TM", 795, "Turkmenistan", &[], "Ashgabat", "Turkmenistan New Manat"),
    country("TV", 798, "Tuvalu", &[], "Funafuti", "Australian Dollar"),
    country("UG", 800, "Uganda", &[], "Kampala", "Uganda Shilling"),
    country("UA", 804, "Ukraine", &["ukraina", "україна"], "Kyiv", "Hryvnia"),
    country("AE", 784, "United Arab Emirates", &["uae", "emirates"], "Abu Dhabi", "UAE Dirham"),
    country("GB", 826, "United Kingdom", &["uk", "great britain", "britain"], "London", "Pound Sterling"),
    country("US", 840, "United States", &["united states of america", "usa", "america"], "Washington, D.C.", "US Dollar"),
    country("UY", 858, "Uruguay", &[], "Montevideo", "Peso Uruguayo"),
    country("UZ", 860, "Uzbekistan", &["o'zbekiston"], "Tashkent", "Uzbekistan Sum"),
    country("VU", 548, "Vanuatu", &[], "Port Vila", "Vatu"),
    country("VA", 336, "Vatican City", &["holy see", "vatican"], "Vatican City", "Euro"),
    country("VE", 862, "Venezuela", &["bolivarian republic of venezuela"], "Caracas", "Bolívar Soberano"),
    country("VN", 704, "Vietnam", &["viet nam"], "Hanoi", "Dong"),
    country("YE", 887, "Yemen", &[], "Sana'a", "Yemeni Rial"),
    country("ZM", 894, "Zambia", &[], "Lusaka", "Zambian Kwacha"),
    country("ZW", 716, "Zimbabwe", &[], "Harare", "Zimbabwe Gold"),
    // Dependent territories and special areas.
    country("AX", 248, "Åland Islands", &["aland", "ahvenanmaa"], "Mariehamn", "Euro"),
    country("AS", 16, "American Samoa", &[], "Pago Pago", "US Dollar"),
    country("AI", 660, "Anguilla", &[], "The Valley", "East Caribbean Dollar"),
    country("AQ", 10, "Antarctica", &[], "", ""),
    country("AW", 533, "Aruba", &[], "Oranjestad", "Aruban Florin"),
    country("BM", 60, "Bermuda", &[], "Hamilton", "Bermudian Dollar"),
    country("BQ", 535, "Bonaire, Sint Eustatius and Saba", &["caribbean netherlands", "bonaire"], "Kralendijk", "US Dollar"),
    country("BV", 74, "Bouvet Island", &["bouvetoya"], "", "Norwegian Krone"),
    country("IO", 86, "British Indian Ocean Territory", &["chagos islands"], "Diego Garcia", "US Dollar"),
    country("VG", 92, "British Virgin Islands", &["virgin islands, british"], "Road Town", "US Dollar"),
    country("KY", 136, "Cayman Islands", &[], "George Town", "Cayman Islands Dollar"),
    country("CX", 162, "Christmas Island", &[], "Flying Fish Cove", "Australian Dollar"),
    country("CC", 166, "Cocos (Keeling) Islands", &["cocos islands", "keeling islands"], "West Island", "Australian Dollar"),
    country("CK", 184, "Cook Islands", &[], "Avarua", "New Zealand Dollar"),
    country("CW", 531, "Curaçao", &["curacao", "korsou"], "Willemstad", "Netherlands Antillean Guilder"),
    country("FK", 238, "Falkland Islands", &["falkland islands (malvinas)", "islas malvinas"], "Stanley", "Falkland Islands Pound"),
    country("FO", 234, "Faroe Islands", &["faroes", "føroyar", "færøerne"], "Tórshavn", "Danish Krone"),
    country("GF", 254, "French Guiana", &["guyane"], "Cayenne", "Euro"),
    country("PF", 258, "French Polynesia", &["polynésie française"], "Papeete", "CFP Franc"),
    country("TF", 260, "French Southern Territories", &["terres australes et antarctiques françaises"], "Port-aux-Français", "Euro"),
    country("GI", 292, "Gibraltar", &[], "Gibraltar", "Gibraltar Pound"),
    country("GP", 312, "Guadeloupe", &[], "Basse-Terre", "Euro"),
    country("GU", 316, "Guam", &["guåhån"], "Hagåtña", "US Dollar"),
    country("GG", 831, "Guernsey", &[], "St Peter Port", "Pound Sterling"),
    country("HM", 334, "Heard Island and McDonald Islands", &[], "", "Australian Dollar"),
    country("HK", 344, "Hong Kong", &["hong kong sar", "hong kong sar china", "香港"], "City of Victoria", "Hong Kong Dollar"),
    country("IM", 833, "Isle of Man", &["mannin"], "Douglas", "Pound Sterling"),
    country("JE", 832, "Jersey", &[], "Saint Helier", "Pound Sterling"),
    country("MO", 446, "Macao", &["macau", "macao sar", "macao sar china", "澳門"], "Macao", "Pataca"),
    country("MQ", 474, "Martinique", &[], "Fort-de-France", "Euro"),
    country("YT", 175, "Mayotte", &["maore"], "Mamoudzou", "Euro"),
    country("MS", 500, "Montserrat", &[], "Plymouth", "East Caribbean Dollar"),
    country("NC", 540, "New Caledonia", &["nouvelle-calédonie"], "Nouméa", "CFP Franc"),
    country("NU", 570, "Niue", &[], "Alofi", "New Zealand Dollar"),
    country("NF", 574, "Norfolk Island", &[], "Kingston", "Australian Dollar"),
    country("MP", 580, "Northern Mariana Islands", &[], "Saipan", "US Dollar"),
    country("PN", 612, "Pitcairn", &["pitcairn islands"], "Adamstown", "New Zealand Dollar"),
    country("RE", 638, "Réunion", &["la réunion"], "Saint-Denis", "Euro"),
    country("BL", 652, "Saint Barthélemy", &["st. barthélemy", "st barts"], "Gustavia", "Euro"),
    country("SH", 654, "Saint Helena, Ascension and Tristan da Cunha", &["saint helena", "st. helena"], "Jamestown", "Saint Helena Pound"),
    country("MF", 663, "Saint Martin", &["saint-martin", "saint martin (french part)", "st. martin"], "Marigot", "Euro"),
    country("PM", 666, "Saint Pierre and Miquelon", &["saint-pierre-et-miquelon", "st. pierre and miquelon"], "Saint-Pierre", "Euro"),
    country("SX", 534, "Sint Maarten", &["sint maarten (dutch part)"], "Philipsburg", "Netherlands Antillean Guilder"),
    country("GS", 239, "South Georgia and the South Sandwich Islands", &[], "King Edward Point", "Pound Sterling"),
    country("SJ", 744, "Svalbard and Jan Mayen", &["svalbard"], "Longyearbyen", "Norwegian Krone"),
    country("TK", 772, "Tokelau", &[], "", "New Zealand Dollar"),
    country("TC", 796, "Turks and Caicos Islands", &[], "Cockburn Town", "US Dollar"),
    country("UM", 581, "United States Minor Outlying Islands", &[], "", "US Dollar"),
    country("VI", 850, "United States Virgin Islands", &["virgin islands, u.s.", "u.s. virgin islands"], "Charlotte Amalie", "US Dollar"),
    country("WF", 876, "Wallis and Futuna", &["wallis-et-futuna"], "Mata-Utu", "CFP Franc"),
    country("EH", 732, "Western Sahara", &["sahrawi republic"], "Laayoune", "Moroccan Dirham"),
];

/// Shortest query or name length eligible for token containment.
const MIN_SUBSTRING_LEN: usize = 4;

/// Largest edit distance accepted by the fuzzy pass.
const MAX_EDIT_DISTANCE: usize = 2;

/// The compiled-in country reference data.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCountries;

impl BuiltinCountries {
    /// Fuzzy search: exact name/alias/alpha-2, then whole-token
    /// containment, then edit distance. A tie between two countries in a
    /// pass is no match.
    fn search(&self, text: &str) -> Option<&'static CountryData> {
        let q = fold(text);
        if q.is_empty() {
            return None;
        }

        if let Some(c) = exact_match(&q) {
            return Some(c);
        }

        // Whole-token containment: fewest unmatched tokens wins.
        if q.chars().count() >= MIN_SUBSTRING_LEN {
            let query = tokens(&q);
            let candidates = COUNTRIES.iter().filter_map(|c| {
                names(c)
                    .map(fold)
                    .filter(|n| n.chars().count() >= MIN_SUBSTRING_LEN)
                    .filter_map(|n| containment_gap(&query, &tokens(&n)))
                    .min()
                    .map(|gap| (c, gap))
            });
            if let Some(found) = unique_best(candidates) {
                return found;
            }
        }

        // Fuzzy match (edit distance <= 2)
        let candidates = COUNTRIES.iter().filter_map(|c| {
            names(c)
                .map(|n| edit_distance(&q, &fold(n)))
                .filter(|d| *d <= MAX_EDIT_DISTANCE)
                .min()
                .map(|d| (c, d))
        });
        unique_best(candidates).flatten()
    }

    /// Number of countries in the dataset.
    pub fn len(&self) -> usize {
        COUNTRIES.len()
    }

    pub fn is_empty(&self) -> bool {
        COUNTRIES.is_empty()
    }
}

impl CountryMatcher for BuiltinCountries {
    fn match_country(&self, text: &str) -> Result<Option<CountryId>, LookupError> {
        Ok(self.search(text).map(|c| CountryId {
            alpha2: c.alpha2.to_string(),
            numeric: c.numeric,
            name: c.name.to_string(),
        }))
    }
}

impl CurrencyDirectory for BuiltinCountries {
    fn currency_for(&self, numeric: u16) -> Result<Option<String>, LookupError> {
        Ok(COUNTRIES
            .iter()
            .find(|c| c.numeric == numeric)
            .map(|c| c.currency)
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }
}

impl CapitalDirectory for BuiltinCountries {
    fn capital_of(&self, country: &str) -> Result<Option<String>, LookupError> {
        let q = fold(country);
        if q.is_empty() {
            return Ok(None);
        }
        Ok(exact_match(&q)
            .map(|c| c.capital)
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }
}

fn names(c: &CountryData) -> impl Iterator<Item = &'static str> {
    let aliases: &'static [&'static str] = c.aliases;
    std::iter::once(c.name).chain(aliases.iter().copied())
}

fn exact_match(folded: &str) -> Option<&'static CountryData> {
    COUNTRIES.iter().find(|c| {
        names(c).any(|n| fold(n) == folded) || (folded.len() == 2 && c.alpha2.eq_ignore_ascii_case(folded))
    })
}

/// Words that never decide a match on their own.
const FILLER_WORDS: &[&str] = &["of", "the", "and"];

fn tokens(folded: &str) -> Vec<&str> {
    let mut out: Vec<&str> = folded
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty() && !FILLER_WORDS.contains(t))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Tokens left unmatched when one token set contains the other; `None`
/// when neither does.
fn containment_gap(query: &[&str], name: &[&str]) -> Option<usize> {
    if query.is_empty() || name.is_empty() {
        return None;
    }
    let name_in_query = name.iter().all(|t| query.contains(t));
    let query_in_name = query.iter().all(|t| name.contains(t));
    (name_in_query || query_in_name).then(|| query.len().abs_diff(name.len()))
}

/// Lowest-scoring candidate. `Some(None)` when two countries tie for
/// the lowest score, `None` when there were no candidates.
fn unique_best(
    candidates: impl Iterator<Item = (&'static CountryData, usize)>,
) -> Option<Option<&'static CountryData>> {
    let mut best: Option<(&'static CountryData, usize)> = None;
    let mut tied = false;
    for (c, score) in candidates {
        match best {
            Some((_, s)) if score > s => {}
            Some((b, s)) if score == s => tied |= b.alpha2 != c.alpha2,
            _ => {
                best = Some((c, score));
                tied = false;
            }
        }
    }
    best.map(|(c, _)| (!tied).then_some(c))
}

/// Lowercase, strip common diacritics, collapse whitespace.
fn fold(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            'ș' | 'ş' => 's',
            'ț' | 'ţ' => 't',
            '’' | '`' => '\'',
            _ => c,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compute edit distance between two strings (Levenshtein).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(text: &str) -> Option<String> {
        BuiltinCountries.match_country(text).unwrap().map(|c| c.alpha2)
    }

    #[test]
    fn test_exact_and_case_insensitive() {
        assert_eq!(matched("Portugal").as_deref(), Some("PT"));
        assert_eq!(matched("PORTUGAL").as_deref(), Some("PT"));
        assert_eq!(matched("  united   kingdom ").as_deref(), Some("GB"));
    }

    #[test]
    fn test_aliases_and_native_names() {
        assert_eq!(matched("Deutschland").as_deref(), Some("DE"));
        assert_eq!(matched("España").as_deref(), Some("ES"));
        assert_eq!(matched("Côte d’Ivoire").as_deref(), Some("CI"));
        assert_eq!(matched("日本").as_deref(), Some("JP"));
    }

    #[test]
    fn test_alpha2_code() {
        assert_eq!(matched("pt").as_deref(), Some("PT"));
        assert_eq!(matched("US").as_deref(), Some("US"));
    }

    #[test]
    fn test_exact_beats_substring() {
        assert_eq!(matched("Dominica").as_deref(), Some("DM"));
        assert_eq!(matched("Niger").as_deref(), Some("NE"));
        assert_eq!(matched("Guinea").as_deref(), Some("GN"));
    }

    #[test]
    fn test_substring() {
        assert_eq!(matched("Kingdom of Spain").as_deref(), Some("ES"));
        assert_eq!(matched("Republic of Portugal").as_deref(), Some("PT"));
    }

    #[test]
    fn test_token_containment_prefers_fullest_name() {
        assert_eq!(matched("Democratic Republic of Congo").as_deref(), Some("CD"));
        assert_eq!(matched("Republic of South Sudan").as_deref(), Some("SS"));
        assert_eq!(matched("Hong Kong SAR, China").as_deref(), Some("HK"));
    }

    #[test]
    fn test_names_inside_words_do_not_match() {
        // A country name inside a longer word is not that country.
        assert_eq!(matched("Somaliland"), None);
        assert_eq!(matched("Omanland"), None);
    }

    #[test]
    fn test_tied_candidates_are_no_match() {
        assert_eq!(matched("United"), None);
        assert_eq!(matched("Islands"), None);
    }

    #[test]
    fn test_territories() {
        assert_eq!(matched("Hong Kong").as_deref(), Some("HK"));
        assert_eq!(matched("Macau").as_deref(), Some("MO"));
        assert_eq!(matched("Gibraltar").as_deref(), Some("GI"));
        assert_eq!(matched("Faroe Islands").as_deref(), Some("FO"));
        assert_eq!(matched("Guadeloupe").as_deref(), Some("GP"));
        assert_eq!(matched("Réunion").as_deref(), Some("RE"));
        assert_eq!(BuiltinCountries.currency_for(344).unwrap().as_deref(), Some("Hong Kong Dollar"));
        assert_eq!(BuiltinCountries.currency_for(446).unwrap().as_deref(), Some("Pataca"));
        assert_eq!(BuiltinCountries.capital_of("Faroe Islands").unwrap().as_deref(), Some("Tórshavn"));
        assert_eq!(BuiltinCountries.capital_of("Gibraltar").unwrap().as_deref(), Some("Gibraltar"));
    }

    #[test]
    fn test_blank_reference_values_are_absent() {
        assert_eq!(BuiltinCountries.capital_of("Antarctica").unwrap(), None);
        assert_eq!(BuiltinCountries.currency_for(10).unwrap(), None);
    }

    #[test]
    fn test_fuzzy_typo() {
        assert_eq!(matched("Portgual").as_deref(), Some("PT"));
        assert_eq!(matched("Germny").as_deref(), Some("DE"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(matched("Atlantis Prime"), None);
        assert_eq!(matched(""), None);
        assert_eq!(matched("   "), None);
    }

    #[test]
    fn test_currency_by_numeric() {
        assert_eq!(BuiltinCountries.currency_for(620).unwrap().as_deref(), Some("Euro"));
        assert_eq!(BuiltinCountries.currency_for(392).unwrap().as_deref(), Some("Yen"));
        assert_eq!(BuiltinCountries.currency_for(999).unwrap(), None);
    }

    #[test]
    fn test_capital_exact_only() {
        assert_eq!(BuiltinCountries.capital_of("Portugal").unwrap().as_deref(), Some("Lisbon"));
        assert_eq!(BuiltinCountries.capital_of("france").unwrap().as_deref(), Some("Paris"));
        assert_eq!(BuiltinCountries.capital_of("Portgual").unwrap(), None);
        assert_eq!(BuiltinCountries.capital_of("").unwrap(), None);
    }

    #[test]
    fn test_dataset_codes_unique() {
        // Every ISO 3166-1 entry.
        assert_eq!(BuiltinCountries.len(), 249);

        let mut numerics: Vec<u16> = COUNTRIES.iter().map(|c| c.numeric).collect();
        numerics.sort_unstable();
        numerics.dedup();
        assert_eq!(numerics.len(), BuiltinCountries.len());

        let mut alphas: Vec<&str> = COUNTRIES.iter().map(|c| c.alpha2).collect();
        alphas.sort_unstable();
        alphas.dedup();
        assert_eq!(alphas.len(), BuiltinCountries.len());
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("portugal", "portgual"), 2);
        assert_eq!(edit_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("  São   Tomé "), "sao tome");
        assert_eq!(fold("Côte d’Ivoire"), "cote d'ivoire");
    }
}
