use serde::Serialize;

use crate::catalog::{AnswerSet, Item, Likert};
use crate::content::Bundle;
use crate::Error;

/// 回答の最大点
pub const MAX_ANSWER: u32 = 4;

/// 逆転項目を考慮した点数
///
/// 逆転項目は 1⇒4、2⇒3、3⇒2、4⇒1 に置き換える。
/// 置き換え後は点数が高いほどストレスが高い。
pub fn normalize(item: &Item, raw: u8) -> Result<u8, Error> {
    Ok(item.score(Likert::try_from(raw)?))
}

/// 合計点数
///
/// 設問票にある設問のうち回答済みのものだけを足し合わせる。
/// 設問票にない設問番号の回答は無視する。
pub fn total_score(items: &[Item], answers: &AnswerSet) -> u32 {
    items
        .iter()
        .filter_map(|item| answers.get(item.id).map(|answer| u32::from(item.score(answer))))
        .sum()
}

/// 全設問に回答した場合の最高点
pub fn max_score(items: &[Item]) -> u32 {
    MAX_ANSWER * items.len() as u32
}

/// 区分ごとの点数 (表示名なし)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub section: u32,
    pub score: u32,
    pub answered: usize,
    pub percentage: f64,
}

/// 区分ごとの点数 (表示名つき)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub section: u32,
    pub name: String,
    pub score: u32,
    pub percentage: f64,
}

/// 区分ごとの点数を割合の高い順に並べる
///
/// 回答が1つもない区分は含めない。割合が同じ区分は設問票に最初に
/// 現れた順を保つ。
pub fn section_scores(items: &[Item], answers: &AnswerSet) -> Vec<SectionScore> {
    let mut sections: Vec<(u32, u32, usize)> = Vec::new();
    for item in items {
        let Some(answer) = answers.get(item.id) else {
            continue;
        };
        let score = u32::from(item.score(answer));
        match sections.iter_mut().find(|(section, _, _)| *section == item.section) {
            Some((_, sum, answered)) => {
                *sum += score;
                *answered += 1;
            }
            None => sections.push((item.section, score, 1)),
        }
    }

    let mut scores = sections
        .into_iter()
        .map(|(section, score, answered)| SectionScore {
            section,
            score,
            answered,
            percentage: f64::from(score) / (f64::from(MAX_ANSWER) * answered as f64) * 100.0,
        })
        .collect::<Vec<_>>();
    // sort_by is stable
    scores.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    scores
}

pub fn section_summaries(
    bundle: &Bundle,
    answers: &AnswerSet,
) -> Result<Vec<SectionSummary>, Error> {
    section_scores(bundle.items(), answers)
        .into_iter()
        .map(|score| {
            Ok(SectionSummary {
                section: score.section,
                name: bundle.section_name(score.section)?.to_string(),
                score: score.score,
                percentage: score.percentage,
            })
        })
        .collect()
}

/// ストレスの程度
///
/// 区切りは 28/40/52 点の固定値。16設問 (最高64点) を前提にした値で、
/// 設問数が変わっても換算しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Low, Band::Moderate, Band::High, Band::VeryHigh];

    pub fn tag(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Moderate => "moderate",
            Band::High => "high",
            Band::VeryHigh => "very_high",
        }
    }

    /// 表示色の系統
    pub fn accent(&self) -> &'static str {
        match self {
            Band::Low => "emerald",
            Band::Moderate => "yellow",
            Band::High => "orange",
            Band::VeryHigh => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Band::Low => "coffee",
            Band::Moderate => "brain",
            Band::High | Band::VeryHigh => "brain-circuit",
        }
    }
}

pub fn classify(total: u32) -> Band {
    match total {
        0..=28 => Band::Low,
        29..=40 => Band::Moderate,
        41..=52 => Band::High,
        _ => Band::VeryHigh,
    }
}

/// 判定結果と表示文言
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub band: Band,
    pub level: String,
    pub description: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::content::ContentProvider;
    use crate::locale::Locale;
    use pretty_assertions::assert_eq;

    fn item(id: u32, is_reversed: bool, section: u32) -> Item {
        Item {
            id,
            text: format!("question {}", id),
            is_reversed,
            section,
        }
    }

    fn answers(values: &[(u32, u8)]) -> AnswerSet {
        values
            .iter()
            .map(|&(id, raw)| (id, Likert::try_from(raw).unwrap()))
            .collect()
    }

    fn builtin_items() -> &'static [Item] {
        ContentProvider::builtin()
            .unwrap()
            .items_for(Locale::En)
            .unwrap()
    }

    #[test]
    fn test_normalize() {
        let plain = item(1, false, 1);
        let reversed = item(2, true, 1);
        for raw in 1..=4 {
            assert_eq!(normalize(&plain, raw).unwrap(), raw);
            assert_eq!(normalize(&reversed, raw).unwrap(), 5 - raw);
        }
        assert!(matches!(
            normalize(&plain, 0),
            Err(Error::InvalidAnswerValue(0))
        ));
        assert!(matches!(
            normalize(&reversed, 5),
            Err(Error::InvalidAnswerValue(5))
        ));
    }

    #[test]
    fn test_total_score_empty() {
        assert_eq!(total_score(builtin_items(), &AnswerSet::new()), 0);
        assert!(section_scores(builtin_items(), &AnswerSet::new()).is_empty());
    }

    #[test]
    fn test_total_score_ignores_unknown_ids() {
        let items = vec![item(1, false, 1), item(2, true, 1)];
        let answers = answers(&[(1, 4), (2, 4), (99, 4)]);
        assert_eq!(total_score(&items, &answers), 4 + 1);
    }

    #[test]
    fn test_total_score_all_agree() {
        let items = builtin_items();
        let answers = items
            .iter()
            .map(|item| (item.id, Likert::Agree))
            .collect::<AnswerSet>();
        // 逆転項目6問 × 2点 + 通常項目10問 × 3点
        assert_eq!(total_score(items, &answers), 42);
        assert_eq!(classify(total_score(items, &answers)), Band::High);
    }

    #[test]
    fn test_total_score_bounds() {
        let items = builtin_items();
        let lowest = items
            .iter()
            .map(|item| {
                let answer = if item.is_reversed {
                    Likert::StronglyAgree
                } else {
                    Likert::StronglyDisagree
                };
                (item.id, answer)
            })
            .collect::<AnswerSet>();
        let highest = items
            .iter()
            .map(|item| {
                let answer = if item.is_reversed {
                    Likert::StronglyDisagree
                } else {
                    Likert::StronglyAgree
                };
                (item.id, answer)
            })
            .collect::<AnswerSet>();
        assert_eq!(total_score(items, &lowest), 16);
        assert_eq!(total_score(items, &highest), 64);
        assert_eq!(max_score(items), 64);
    }

    #[test]
    fn test_max_score_follows_catalog_size() {
        let items = vec![item(1, false, 1), item(2, false, 2), item(3, true, 2)];
        assert_eq!(max_score(&items), 12);
        assert_eq!(max_score(&[]), 0);
    }

    #[test]
    fn test_section_scores() {
        let items = vec![
            item(1, false, 1),
            item(2, false, 1),
            item(3, true, 2),
            item(4, false, 3),
        ];
        let scores = section_scores(&items, &answers(&[(1, 4), (2, 2), (3, 1)]));
        assert_eq!(
            scores,
            vec![
                SectionScore {
                    section: 2,
                    score: 4,
                    answered: 1,
                    percentage: 100.0,
                },
                SectionScore {
                    section: 1,
                    score: 6,
                    answered: 2,
                    percentage: 75.0,
                },
            ]
        );
    }

    #[test]
    fn test_section_scores_partial_section() {
        let items = vec![item(1, false, 1), item(2, false, 1), item(3, false, 1)];
        let scores = section_scores(&items, &answers(&[(2, 3)]));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].answered, 1);
        assert_eq!(scores[0].percentage, 75.0);
    }

    #[test]
    fn test_section_scores_not_rounded() {
        let items = vec![item(1, false, 1), item(2, false, 1), item(3, false, 1)];
        let scores = section_scores(&items, &answers(&[(1, 1), (2, 1), (3, 2)]));
        assert_eq!(scores[0].score, 4);
        assert!((scores[0].percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_scores_tie_keeps_catalog_order() {
        let items = vec![
            item(1, false, 3),
            item(2, false, 1),
            item(3, false, 2),
            item(4, false, 1),
        ];
        let answers = answers(&[(1, 2), (2, 2), (3, 4), (4, 2)]);
        let scores = section_scores(&items, &answers);
        let order = scores.iter().map(|score| score.section).collect::<Vec<_>>();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_section_summaries_names() {
        let content = ContentProvider::builtin().unwrap();
        let bundle = content.bundle(Locale::En).unwrap();
        let summaries = section_summaries(bundle, &answers(&[(1, 4), (10, 1)])).unwrap();
        assert_eq!(
            summaries,
            vec![
                SectionSummary {
                    section: 1,
                    name: "Workload".to_string(),
                    score: 4,
                    percentage: 100.0,
                },
                SectionSummary {
                    section: 4,
                    name: "Time Pressure".to_string(),
                    score: 1,
                    percentage: 25.0,
                },
            ]
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0), Band::Low);
        assert_eq!(classify(28), Band::Low);
        assert_eq!(classify(29), Band::Moderate);
        assert_eq!(classify(40), Band::Moderate);
        assert_eq!(classify(41), Band::High);
        assert_eq!(classify(52), Band::High);
        assert_eq!(classify(53), Band::VeryHigh);
        assert_eq!(classify(64), Band::VeryHigh);
        assert_eq!(classify(200), Band::VeryHigh);
    }

    #[test]
    fn test_band_display_hints() {
        let tags = Band::ALL.iter().map(Band::tag).collect::<Vec<_>>();
        assert_eq!(tags, vec!["low", "moderate", "high", "very_high"]);
        assert_eq!(Band::Low.accent(), "emerald");
        assert_eq!(Band::VeryHigh.icon(), "brain-circuit");
    }
}
