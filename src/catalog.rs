use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// 回答選択肢
///
/// 1: まったくそうでない 〜 4: まったくそうだ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Likert {
    StronglyDisagree = 1,
    Disagree = 2,
    Agree = 3,
    StronglyAgree = 4,
}

impl Likert {
    pub const ALL: [Likert; 4] = [
        Likert::StronglyDisagree,
        Likert::Disagree,
        Likert::Agree,
        Likert::StronglyAgree,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// 逆転後の選択肢 (1⇒4、2⇒3、3⇒2、4⇒1)
    pub fn reversed(self) -> Likert {
        match self {
            Likert::StronglyDisagree => Likert::StronglyAgree,
            Likert::Disagree => Likert::Agree,
            Likert::Agree => Likert::Disagree,
            Likert::StronglyAgree => Likert::StronglyDisagree,
        }
    }
}

impl TryFrom<u8> for Likert {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Likert::StronglyDisagree),
            2 => Ok(Likert::Disagree),
            3 => Ok(Likert::Agree),
            4 => Ok(Likert::StronglyAgree),
            _ => Err(Error::InvalidAnswerValue(value)),
        }
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.value()
    }
}

/// 設問
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    pub id: u32,
    pub text: String,
    /// 点数が低いほどストレスが高い設問
    #[serde(rename = "reverse")]
    pub is_reversed: bool,
    pub section: u32,
}

impl Item {
    /// ストレス方向にそろえた点数 (1〜4)
    pub fn score(&self, answer: Likert) -> u8 {
        if self.is_reversed {
            5 - answer.value()
        } else {
            answer.value()
        }
    }

    /// 言語に依存しない設問の性質
    pub fn shape(&self) -> (u32, bool, u32) {
        (self.id, self.is_reversed, self.section)
    }
}

/// 回答の格納先
///
/// 設問番号ごとに1つの回答を保持する。上書きのみで削除はできない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<u32, Likert>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 回答を格納する。以前の回答があれば返す。
    pub fn insert(&mut self, item_id: u32, answer: Likert) -> Option<Likert> {
        self.values.insert(item_id, answer)
    }

    pub fn get(&self, item_id: u32) -> Option<Likert> {
        self.values.get(&item_id).copied()
    }

    pub fn contains(&self, item_id: u32) -> bool {
        self.values.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Likert)> + '_ {
        self.values.iter().map(|(&id, &answer)| (id, answer))
    }
}

impl FromIterator<(u32, Likert)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (u32, Likert)>>(iter: T) -> Self {
        let mut answers = AnswerSet::new();
        for (id, answer) in iter {
            answers.insert(id, answer);
        }
        answers
    }
}
