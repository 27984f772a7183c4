//! [Name](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html) table implementation.
//!
//! Note that this implementation includes *some* features from the [OpenType Name Table](https://learn.microsoft.com/en-us/typography/opentype/spec/name)

use crate::{stream::Stream, ttf::TTFParseError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameID {
    Copyright,
    FontFamily,
    FontSubFamily,
    UniqueSubFamilyIdentification,
    FullName,
    NameTableVersion,
    PostScriptName,
    Trademark,
    Manufacturer,
    Designer,
    Description,
    VendorURL,
    DesignerURL,
    License,
    LicenseURL,
    Reserved,
    PreferredFamily,
    PreferredSubFamily,
    CompatibleFull,
    SampleText,
    PostScriptCIDFindFontName,
    WWSFamilyName,
    WWSSubFamilyName,
    LightBackgroundPalette,
    DarkBackgroundPalette,
    VariationsPostscriptNamePrefix,
    FontSpecific,
}

impl From<u16> for NameID {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Copyright,
            1 => Self::FontFamily,
            2 => Self::FontSubFamily,
            3 => Self::UniqueSubFamilyIdentification,
            4 => Self::FullName,
            5 => Self::NameTableVersion,
            6 => Self::PostScriptName,
            7 => Self::Trademark,
            8 => Self::Manufacturer,
            9 => Self::Designer,
            10 => Self::Description,
            11 => Self::VendorURL,
            12 => Self::DesignerURL,
            13 => Self::License,
            14 => Self::LicenseURL,
            15 => Self::Reserved,
            16 => Self::PreferredFamily,
            17 => Self::PreferredSubFamily,
            18 => Self::CompatibleFull,
            19 => Self::SampleText,
            20 => Self::PostScriptCIDFindFontName,
            21 => Self::WWSFamilyName,
            22 => Self::WWSSubFamilyName,
            23 => Self::LightBackgroundPalette,
            24 => Self::DarkBackgroundPalette,
            25 => Self::VariationsPostscriptNamePrefix,
            26..=255 => Self::Reserved,
            256.. => Self::FontSpecific,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub name_id: NameID,
    pub language_id: u16,
    pub value: String,
}

#[derive(Clone, Debug, Default)]
pub struct NameTable {
    records: Vec<NameRecord>,
}

impl NameTable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        let format_selector = stream.read::<u16>()?;
        if format_selector > 1 {
            log::warn!("Expected format selector to be 0 or 1, found {format_selector}");
        }

        let num_records = stream.read::<u16>()?;
        let string_offset = stream.read::<u16>()? as usize;

        let mut records = Vec::with_capacity(num_records as usize);
        for _ in 0..num_records {
            let platform_id = stream.read::<u16>()?;
            let encoding_id = stream.read::<u16>()?;
            let language_id = stream.read::<u16>()?;
            let name_id = stream.read::<u16>()?;
            let length = stream.read::<u16>()? as usize;
            let offset = stream.read::<u16>()? as usize;

            let bytes = Stream::new_at(data, string_offset + offset)?.take_bytes(length)?;

            let Some(value) = decode_name(platform_id, encoding_id, bytes) else {
                continue;
            };

            records.push(NameRecord {
                name_id: name_id.into(),
                language_id,
                value,
            });
        }

        Ok(Self { records })
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, name_id: NameID) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.name_id == name_id)
            .map(|record| record.value.as_str())
    }

    /// Get the full name of the font, falling back to the family name
    #[must_use]
    pub fn get_font_name(&self) -> Option<String> {
        self.get(NameID::FullName)
            .or_else(|| self.get(NameID::FontFamily))
            .map(str::to_owned)
    }
}

fn decode_name(platform_id: u16, encoding_id: u16, bytes: &[u8]) -> Option<String> {
    match (platform_id, encoding_id) {
        // Unicode and windows strings are UTF-16BE
        (0, _) | (3, 0 | 1 | 10) => {
            let code_units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            Some(String::from_utf16_lossy(&code_units))
        },
        // Roman, treating anything above ASCII as Latin-1 is close enough for names
        (1, 0) => Some(bytes.iter().map(|&byte| byte as char).collect()),
        _ => None,
    }
}
