use serde::Serialize;

use crate::catalog::{AnswerSet, Likert};
use crate::content::{Bundle, ContentProvider};
use crate::locale::Locale;
use crate::scoring::{self, Interpretation, SectionSummary};
use crate::Error;

/// 回答状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }

    /// 0.0〜1.0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f64 / self.total as f64
    }
}

/// 採点結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub locale: Locale,
    pub total_score: u32,
    pub max_score: u32,
    pub interpretation: Interpretation,
    pub sections: Vec<SectionSummary>,
    pub progress: Progress,
}

/// 1人分の回答セッション
///
/// 回答はこのセッションだけが保持し、採点結果は毎回回答から計算し直す。
#[derive(Debug, Clone)]
pub struct Session<'a> {
    content: &'a ContentProvider,
    bundle: &'a Bundle,
    answers: AnswerSet,
}

impl<'a> Session<'a> {
    pub fn new(content: &'a ContentProvider, locale: Locale) -> Result<Self, Error> {
        Ok(Self {
            content,
            bundle: content.bundle(locale)?,
            answers: AnswerSet::new(),
        })
    }

    pub fn locale(&self) -> Locale {
        self.bundle.locale()
    }

    pub fn bundle(&self) -> &'a Bundle {
        self.bundle
    }

    /// 表示言語を切り替える。回答はそのまま残る。
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), Error> {
        self.bundle = self.content.bundle(locale)?;
        tracing::debug!(%locale, "display language switched");
        Ok(())
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, item_id: u32) -> Option<Likert> {
        self.answers.get(item_id)
    }

    /// 設問番号を指定して回答を格納する
    /// 1〜4の回答番号以外は認めない。
    pub fn submit_answer(&mut self, item_id: u32, raw: u8) -> Result<(), Error> {
        let answer = Likert::try_from(raw).map_err(|err| {
            tracing::warn!(item_id, raw, "rejected answer value");
            err
        })?;
        if self.bundle.item(item_id).is_none() {
            tracing::warn!(item_id, "rejected answer for unknown question");
            return Err(Error::UnknownItem(item_id));
        }
        let previous = self.answers.insert(item_id, answer);
        tracing::debug!(item_id, raw, overwritten = previous.is_some(), "answer stored");
        Ok(())
    }

    pub fn progress(&self) -> Progress {
        let items = self.bundle.items();
        Progress {
            answered: items
                .iter()
                .filter(|item| self.answers.contains(item.id))
                .count(),
            total: items.len(),
        }
    }

    /// 途中の回答でも計算できる
    pub fn results(&self) -> Result<Results, Error> {
        let items = self.bundle.items();
        let total_score = scoring::total_score(items, &self.answers);
        let band = scoring::classify(total_score);
        let results = Results {
            locale: self.locale(),
            total_score,
            max_score: scoring::max_score(items),
            interpretation: self.bundle.interpretation(band),
            sections: scoring::section_summaries(self.bundle, &self.answers)?,
            progress: self.progress(),
        };
        tracing::debug!(
            total_score,
            band = band.tag(),
            answered = results.progress.answered,
            "scored answers"
        );
        Ok(results)
    }

    /// 全設問に回答済みの場合のみ結果を返す
    pub fn final_results(&self) -> Result<Results, Error> {
        let progress = self.progress();
        if !progress.is_complete() {
            return Err(Error::Incomplete {
                answered: progress.answered,
                total: progress.total,
            });
        }
        self.results()
    }
}
