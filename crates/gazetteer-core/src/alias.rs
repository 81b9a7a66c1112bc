// crates/gazetteer-core/src/alias.rs
use crate::common::{DiscardReason, StageReport};
use crate::error::Result;
use crate::loader::common_io::{for_each_row, open_stream, Comments};
use crate::raw::{AlternateNameRaw, FromRow};
use crate::text::strip_diacritics;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Languages whose alternate names are attached to the output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Fa,
    Ar,
}

impl Lang {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fa" => Some(Lang::Fa),
            "ar" => Some(Lang::Ar),
            _ => None,
        }
    }
}

/// Persian and Arabic display names of one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalNames {
    pub fa: Option<String>,
    pub ar: Option<String>,
}

impl LocalNames {
    fn slot(&mut self, lang: Lang) -> &mut Option<String> {
        match lang {
            Lang::Fa => &mut self.fa,
            Lang::Ar => &mut self.ar,
        }
    }
}

/// Place identifier → Persian/Arabic names, with diacritics stripped.
///
/// Built once from `alternateNames.txt` and only read afterwards. The first
/// name seen for a (place, language) pair is kept.
#[derive(Debug, Clone, Default)]
pub struct AlternateNameIndex {
    names: HashMap<String, LocalNames>,
}

impl AlternateNameIndex {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<(Self, StageReport)> {
        let reader = open_stream(path.as_ref())?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, StageReport)> {
        let mut index = Self::default();
        let mut report = StageReport::default();

        for_each_row(reader, Comments::Keep, |row| {
            let raw = match row.and_then(|row| AlternateNameRaw::parse(&row)) {
                Ok(raw) => raw,
                Err(reason) => return report.record_discard(reason),
            };
            match index.insert(&raw) {
                Ok(()) => report.loaded += 1,
                Err(reason) => report.record_discard(reason),
            }
        })?;

        info!(
            "Indexed {} alternate names for {} places",
            report.loaded,
            index.len()
        );
        Ok((index, report))
    }

    fn insert(&mut self, raw: &AlternateNameRaw) -> std::result::Result<(), DiscardReason> {
        let lang = Lang::from_code(&raw.isolanguage).ok_or(DiscardReason::UnwantedLanguage)?;
        let slot = self
            .names
            .entry(raw.geonameid.clone())
            .or_default()
            .slot(lang);
        if slot.is_some() {
            return Err(DiscardReason::DuplicateName);
        }
        *slot = Some(strip_diacritics(&raw.name));
        Ok(())
    }

    pub fn get(&self, geonameid: &str, lang: Lang) -> Option<&str> {
        let names = self.names.get(geonameid)?;
        match lang {
            Lang::Fa => names.fa.as_deref(),
            Lang::Ar => names.ar.as_deref(),
        }
    }

    /// The name in `lang`, or `""` when none was recorded.
    pub fn name_or_empty(&self, geonameid: &str, lang: Lang) -> String {
        self.get(geonameid, lang).unwrap_or_default().to_owned()
    }

    /// Number of places with at least one recorded name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(input: &str) -> (AlternateNameIndex, StageReport) {
        AlternateNameIndex::from_reader(input.as_bytes()).unwrap()
    }

    #[test]
    fn keeps_only_persian_and_arabic() {
        let (idx, report) = index(
            "1\t112931\tfa\tتهران\n\
             2\t112931\tar\tطهران\n\
             3\t112931\ten\tTehran\n\
             4\t112931\tfa-IR\tتهران\n",
        );
        assert_eq!(idx.get("112931", Lang::Fa), Some("تهران"));
        assert_eq!(idx.get("112931", Lang::Ar), Some("طهران"));
        assert_eq!(report.loaded, 2);
        assert_eq!(report.discarded(DiscardReason::UnwantedLanguage), 2);
    }

    #[test]
    fn first_name_wins_per_language() {
        let (idx, report) = index(
            "1\t130758\tfa\tایران\n\
             2\t130758\tfa\tجمهوری اسلامی ایران\n\
             3\t130758\tar\tإيران\n",
        );
        assert_eq!(idx.get("130758", Lang::Fa), Some("ایران"));
        assert_eq!(report.discarded(DiscardReason::DuplicateName), 1);
    }

    #[test]
    fn stores_names_without_diacritics() {
        let (idx, _) = index("1\t104515\tar\tمَكَّة\n");
        assert_eq!(idx.get("104515", Lang::Ar), Some("مكة"));
    }

    #[test]
    fn short_lines_are_skipped() {
        let (idx, report) = index("1\t5\tfa\n1\t6\tfa\tنام\n");
        assert_eq!(idx.len(), 1);
        assert_eq!(report.discarded(DiscardReason::MalformedRecord), 1);
    }

    #[test]
    fn missing_names_default_to_empty() {
        let (idx, _) = index("1\t7\tfa\tنام\n");
        assert_eq!(idx.name_or_empty("7", Lang::Ar), "");
        assert_eq!(idx.name_or_empty("unknown", Lang::Fa), "");
        assert_eq!(idx.name_or_empty("7", Lang::Fa), "نام");
    }
}
