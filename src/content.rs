use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::catalog::Item;
use crate::locale::Locale;
use crate::scoring::{Band, Interpretation};
use crate::Error;

const EN: &str = include_str!("../resources/en.json");
const ID: &str = include_str!("../resources/id.json");

static BUILTIN: OnceCell<ContentProvider> = OnceCell::new();

/// 画面表示用の固定文言
#[derive(Debug, Clone, Deserialize)]
pub struct UiText {
    pub app_title: String,
    pub app_subtitle: String,
    /// `{answered}` と `{total}` を置換する
    pub progress_text: String,
    /// `{remaining}` を置換する
    pub remaining_text: String,
    pub view_results: String,
    pub results_title: String,
    pub total_score: String,
    pub level: String,
    pub section_analysis: String,
    pub points: String,
    pub footer_text: String,
    pub invalid_answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BandText {
    pub level: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BandTexts {
    pub low: BandText,
    pub moderate: BandText,
    pub high: BandText,
    pub very_high: BandText,
}

#[derive(Debug, Deserialize)]
struct RawBundle {
    text: UiText,
    answer_options: [String; 4],
    interpretation: BandTexts,
    section_names: BTreeMap<u32, String>,
    questions: Vec<Item>,
}

/// 1言語分の設問票と文言
#[derive(Debug, Clone)]
pub struct Bundle {
    locale: Locale,
    text: UiText,
    answer_options: [String; 4],
    bands: BandTexts,
    section_names: BTreeMap<u32, String>,
    items: Vec<Item>,
}

impl Bundle {
    /// JSON から設問票を読み込み、設問番号と区分を検証する
    pub fn from_json(locale: Locale, json: &str) -> Result<Self, Error> {
        let raw: RawBundle = serde_json::from_str(json).map_err(Error::Content)?;
        let bundle = Bundle {
            locale,
            text: raw.text,
            answer_options: raw.answer_options,
            bands: raw.interpretation,
            section_names: raw.section_names,
            items: raw.questions,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::ContentMismatch(format!(
                "{} catalog has no questions",
                self.locale
            )));
        }
        let mut previous = 0;
        for item in &self.items {
            if item.id <= previous {
                return Err(Error::ContentMismatch(format!(
                    "{} question ids must be positive and strictly ascending, found {} after {}",
                    self.locale, item.id, previous
                )));
            }
            previous = item.id;
            if !self.section_names.contains_key(&item.section) {
                return Err(Error::UnknownSection(item.section));
            }
        }
        Ok(())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn text(&self) -> &UiText {
        &self.text
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 設問番号を指定して設問を取得する
    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn section_name(&self, section: u32) -> Result<&str, Error> {
        self.section_names
            .get(&section)
            .map(String::as_str)
            .ok_or(Error::UnknownSection(section))
    }

    /// 添字 0〜3 が回答 1〜4 に対応する
    pub fn answer_option_labels(&self) -> &[String; 4] {
        &self.answer_options
    }

    pub fn interpretation(&self, band: Band) -> Interpretation {
        let text = match band {
            Band::Low => &self.bands.low,
            Band::Moderate => &self.bands.moderate,
            Band::High => &self.bands.high,
            Band::VeryHigh => &self.bands.very_high,
        };
        Interpretation {
            band,
            level: text.level.clone(),
            description: text.description.clone(),
        }
    }

    pub fn progress_text(&self, answered: usize, total: usize) -> String {
        self.text
            .progress_text
            .replace("{answered}", &answered.to_string())
            .replace("{total}", &total.to_string())
    }

    pub fn remaining_text(&self, remaining: usize) -> String {
        self.text
            .remaining_text
            .replace("{remaining}", &remaining.to_string())
    }
}

/// 言語ごとの設問票の提供元
#[derive(Debug, Clone)]
pub struct ContentProvider {
    bundles: BTreeMap<Locale, Bundle>,
}

impl ContentProvider {
    /// 組み込みの英語版・インドネシア語版。初回呼び出し時に一度だけ検証する。
    pub fn builtin() -> Result<&'static ContentProvider, Error> {
        BUILTIN.get_or_try_init(|| {
            ContentProvider::from_bundles(vec![
                Bundle::from_json(Locale::En, EN)?,
                Bundle::from_json(Locale::Id, ID)?,
            ])
        })
    }

    /// 全言語で設問番号・逆転項目・区分が一致することを検証する
    pub fn from_bundles(bundles: Vec<Bundle>) -> Result<Self, Error> {
        let mut map = BTreeMap::new();
        let mut reference: Option<(Locale, Vec<(u32, bool, u32)>, Vec<u32>)> = None;

        for bundle in bundles {
            let shape = bundle.items.iter().map(Item::shape).collect::<Vec<_>>();
            let sections = bundle.section_names.keys().copied().collect::<Vec<_>>();
            if let Some((locale, expected_shape, expected_sections)) = &reference {
                if *expected_shape != shape {
                    return Err(Error::ContentMismatch(format!(
                        "questions of {} differ from {}",
                        bundle.locale, locale
                    )));
                }
                if *expected_sections != sections {
                    return Err(Error::ContentMismatch(format!(
                        "sections of {} differ from {}",
                        bundle.locale, locale
                    )));
                }
            } else {
                reference = Some((bundle.locale, shape, sections));
            }

            let locale = bundle.locale;
            if map.insert(locale, bundle).is_some() {
                return Err(Error::ContentMismatch(format!(
                    "{} is defined more than once",
                    locale
                )));
            }
        }

        if map.is_empty() {
            return Err(Error::ContentMismatch("no locale is defined".to_string()));
        }
        tracing::debug!(locales = map.len(), "questionnaire content validated");
        Ok(Self { bundles: map })
    }

    pub fn bundle(&self, locale: Locale) -> Result<&Bundle, Error> {
        self.bundles
            .get(&locale)
            .ok_or_else(|| Error::UnsupportedLocale(locale.to_string()))
    }

    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.bundles.keys().copied()
    }

    pub fn items_for(&self, locale: Locale) -> Result<&[Item], Error> {
        Ok(self.bundle(locale)?.items())
    }

    pub fn section_name(&self, locale: Locale, section: u32) -> Result<&str, Error> {
        self.bundle(locale)?.section_name(section)
    }

    pub fn answer_option_labels(&self, locale: Locale) -> Result<&[String; 4], Error> {
        Ok(self.bundle(locale)?.answer_option_labels())
    }
}
