//! Prompt templates.
//!
//! Values are inserted positionally with no escaping.

use crate::model::divination::DivinationType;
use crate::model::fortune::FortuneScores;

/// Prompt for analysing one divination question.
pub fn divination_prompt(kind: DivinationType, question: &str) -> String {
    format!(
        "请根据以下占卜信息进行分析：\n\
         占卜类型：{kind}\n\
         问题：{question}\n\
         请给出详细的解析和建议。"
    )
}

/// Prompt for analysing the five daily fortune scores.
pub fn fortune_prompt(scores: &FortuneScores) -> String {
    format!(
        "请根据以下运势指数进行分析和给出建议：\n\
         总体运势：{}\n\
         感情运势：{}\n\
         事业运势：{}\n\
         健康运势：{}\n\
         财运指数：{}\n\
         请分别给出详细的运势分析和具体的建议。",
        scores.overall, scores.love, scores.career, scores.health, scores.wealth
    )
}

#[cfg(test)]
mod tests {
    use super::{divination_prompt, fortune_prompt};
    use crate::model::divination::DivinationType;
    use crate::model::fortune::FortuneScores;

    #[test]
    fn divination_prompt_embeds_type_and_question_verbatim() {
        let prompt = divination_prompt(DivinationType::Tarot, "事业<b>如何</b>?");
        assert_eq!(
            prompt,
            "请根据以下占卜信息进行分析：\n\
             占卜类型：tarot\n\
             问题：事业<b>如何</b>?\n\
             请给出详细的解析和建议。"
        );
    }

    #[test]
    fn fortune_prompt_embeds_scores_in_order() {
        let scores = FortuneScores {
            overall: 100,
            love: 0,
            career: 42,
            health: 7,
            wealth: 63,
        };
        let prompt = fortune_prompt(&scores);
        assert!(prompt.starts_with("请根据以下运势指数进行分析和给出建议：\n"));
        let expected = "总体运势：100\n感情运势：0\n事业运势：42\n\
                        健康运势：7\n财运指数：63\n";
        assert!(prompt.contains(expected));
        assert!(prompt.ends_with("请分别给出详细的运势分析和具体的建议。"));
    }
}
