//! Wilaya → WooCommerce location-code mapping.
//!
//! WooCommerce identifies Algerian states as `"DZ:DZ-NN"` where `NN` is the
//! zero-padded wilaya number (01–58). The checkout form works with wilaya
//! names, so this table is the bridge. A name missing from the table is an
//! unsupported input by design, not a data error.

/// All 58 wilayas and their WooCommerce location codes.
pub const WILAYA_LOCATION_CODES: &[(&str, &str)] = &[
    ("Adrar", "DZ:DZ-01"),
    ("Chlef", "DZ:DZ-02"),
    ("Laghouat", "DZ:DZ-03"),
    ("Oum El Bouaghi", "DZ:DZ-04"),
    ("Batna", "DZ:DZ-05"),
    ("Béjaïa", "DZ:DZ-06"),
    ("Biskra", "DZ:DZ-07"),
    ("Béchar", "DZ:DZ-08"),
    ("Blida", "DZ:DZ-09"),
    ("Bouira", "DZ:DZ-10"),
    ("Tamanrasset", "DZ:DZ-11"),
    ("Tébessa", "DZ:DZ-12"),
    ("Tlemcen", "DZ:DZ-13"),
    ("Tiaret", "DZ:DZ-14"),
    ("Tizi Ouzou", "DZ:DZ-15"),
    ("Alger", "DZ:DZ-16"),
    ("Djelfa", "DZ:DZ-17"),
    ("Jijel", "DZ:DZ-18"),
    ("Sétif", "DZ:DZ-19"),
    ("Saïda", "DZ:DZ-20"),
    ("Skikda", "DZ:DZ-21"),
    ("Sidi Bel Abbès", "DZ:DZ-22"),
    ("Annaba", "DZ:DZ-23"),
    ("Guelma", "DZ:DZ-24"),
    ("Constantine", "DZ:DZ-25"),
    ("Médéa", "DZ:DZ-26"),
    ("Mostaganem", "DZ:DZ-27"),
    ("M'Sila", "DZ:DZ-28"),
    ("Mascara", "DZ:DZ-29"),
    ("Ouargla", "DZ:DZ-30"),
    ("Oran", "DZ:DZ-31"),
    ("El Bayadh", "DZ:DZ-32"),
    ("Illizi", "DZ:DZ-33"),
    ("Bordj Bou Arreridj", "DZ:DZ-34"),
    ("Boumerdès", "DZ:DZ-35"),
    ("El Tarf", "DZ:DZ-36"),
    ("Tindouf", "DZ:DZ-37"),
    ("Tissemsilt", "DZ:DZ-38"),
    ("El Oued", "DZ:DZ-39"),
    ("Khenchela", "DZ:DZ-40"),
    ("Souk Ahras", "DZ:DZ-41"),
    ("Tipaza", "DZ:DZ-42"),
    ("Mila", "DZ:DZ-43"),
    ("Aïn Defla", "DZ:DZ-44"),
    ("Naâma", "DZ:DZ-45"),
    ("Aïn Témouchent", "DZ:DZ-46"),
    ("Ghardaïa", "DZ:DZ-47"),
    ("Relizane", "DZ:DZ-48"),
    ("Timimoun", "DZ:DZ-49"),
    ("Bordj Badji Mokhtar", "DZ:DZ-50"),
    ("Ouled Djellal", "DZ:DZ-51"),
    ("Béni Abbès", "DZ:DZ-52"),
    ("In Salah", "DZ:DZ-53"),
    ("In Guezzam", "DZ:DZ-54"),
    ("Touggourt", "DZ:DZ-55"),
    ("Djanet", "DZ:DZ-56"),
    ("El M'Ghair", "DZ:DZ-57"),
    ("El Meniaa", "DZ:DZ-58"),
];

/// Looks up the WooCommerce location code for a wilaya name.
#[must_use]
pub fn location_code(wilaya: &str) -> Option<&'static str> {
    WILAYA_LOCATION_CODES
        .iter()
        .find(|(name, _)| *name == wilaya)
        .map(|(_, code)| *code)
}
