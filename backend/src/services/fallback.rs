//! Fallback Generator
//!
//! Local, template-based stand-in for the model. Used when no API key is
//! configured, when the upstream call fails, or when the model's reply is
//! unusable. Never fails and never performs I/O.
//!
//! Templates are keyed by locale, length and detected category; every
//! template is a declarative sentence, so the style mode does not take part
//! in the selection.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use rust_i18n::t;

use crate::models::{LengthMode, RequestParameters, SatireResult};
use crate::utils::Locale;

/// Substitution slot inside every template
pub const WORD_SLOT: &str = "{word}";

type Templates = &'static [&'static str];

/// Templates for one locale and length
#[derive(Debug, Clone, Copy)]
struct TemplateSet {
    tech: Templates,
    work: Templates,
    love: Templates,
    /// Society, and every word no keyword matched
    general: Templates,
}

impl TemplateSet {
    fn for_category(&self, category: SatireCategory) -> Templates {
        match category {
            SatireCategory::Tech => self.tech,
            SatireCategory::Work => self.work,
            SatireCategory::Love => self.love,
            SatireCategory::Society => self.general,
        }
    }
}

type TemplateTable = HashMap<(Locale, LengthMode), TemplateSet>;

// ============================================================================
// Template Table
// ============================================================================

const JA_SHORT: &[&str] = &[
    "{word}：責任の所在をぼかすための装置。",
    "{word}：期待と現実のスキマで増殖する言い訳。",
    "{word}：便利の顔をした新しい義務。",
    "{word}：誰もが語り、誰も守らない約束。",
    "{word}：幸福の代わりに数えやすさをくれる。",
];

const JA_LONG: &[&str] = &[
    "{word}。口では大事だと言い、手元では後回しにする。その矛盾こそが本体である。",
    "{word}は期待と現実のスキマに住みつき、言い訳を肥料にして毎日少しずつ育っている。",
    "{word}について会議を三回開き、結論は次回に持ち越す。それが我々の一番得意な仕事である。",
    "{word}を手に入れた瞬間、人はそれがなかった頃の自由を懐かしむ。便利とはそういうものだ。",
];

const EN_SHORT: &[&str] = &[
    "{word}: an excuse that learned to fill out forms.",
    "{word}: the gap between promise and delivery, monetized.",
    "{word}: everyone's priority and nobody's job.",
    "{word}: a new obligation in a convenience costume.",
];

const EN_LONG: &[&str] = &[
    "{word} is what we praise in meetings and postpone in practice, and the postponing is the real product.",
    "We held three meetings about {word}, reached no conclusion, and scheduled a fourth. That is progress now.",
    "{word} grows quietly in the gap between expectation and reality, fed by a steady supply of excuses.",
    "The moment you get {word}, you start missing the freedom of not having it. That is what convenience means.",
];

const ZH_CN_SHORT: &[&str] = &[
    "{word}：学会了填表格的借口。",
    "{word}：人人都说重要，没人真正负责。",
    "{word}：披着便利外衣的新义务。",
    "{word}：期望与现实之间的生意。",
];

const ZH_CN_LONG: &[&str] = &[
    "{word}在会上被反复称赞，在实际中被无限推迟，而推迟本身才是真正的成果。",
    "关于{word}我们开了三次会，没有结论，于是约了第四次。这就是如今的进展。",
    "{word}在期望与现实的缝隙里悄悄生长，靠源源不断的借口当肥料。",
    "拥有{word}的那一刻，人们就开始怀念没有它时的自由。这就是所谓的便利。",
];

const ZH_TW_SHORT: &[&str] = &[
    "{word}：學會了填表格的藉口。",
    "{word}：人人都說重要，沒人真正負責。",
    "{word}：披著便利外衣的新義務。",
    "{word}：期望與現實之間的生意。",
];

const ZH_TW_LONG: &[&str] = &[
    "{word}在會議上被反覆稱讚，在實際中被無限延後，而延後本身才是真正的成果。",
    "關於{word}我們開了三次會，沒有結論，於是約了第四次。這就是如今的進展。",
    "{word}在期望與現實的縫隙裡悄悄生長，靠源源不絕的藉口當肥料。",
    "擁有{word}的那一刻，人們就開始懷念沒有它時的自由。這就是所謂的便利。",
];

const KO_SHORT: &[&str] = &[
    "{word}: 서류 작성법을 배운 핑계.",
    "{word}: 모두의 우선순위이자 누구의 일도 아닌 것.",
    "{word}: 편리함의 옷을 입은 새로운 의무.",
    "{word}: 기대와 현실 사이에서 하는 장사.",
];

const KO_LONG: &[&str] = &[
    "{word}은(는) 회의에서는 칭찬받고 현장에서는 미뤄진다. 그리고 미루는 것 자체가 진짜 성과다.",
    "{word}에 대해 회의를 세 번 했지만 결론은 없었고 네 번째 회의를 잡았다. 요즘은 그것을 진전이라 부른다.",
    "{word}은(는) 기대와 현실 사이의 틈에서 핑계를 거름 삼아 조용히 자란다.",
    "{word}을(를) 손에 넣는 순간 사람은 그것이 없던 시절의 자유를 그리워한다. 편리함이란 그런 것이다.",
];

const JA_SHORT_TECH: &[&str] = &[
    "{word}：人間がサボる理由を自動生成。",
    "{word}：便利と引き換えに考える力を回収する装置。",
];

const JA_LONG_TECH: &[&str] = &[
    "{word}が仕事を効率化してくれたおかげで、空いた時間はその使い方を覚える研修で埋まった。",
    "{word}に任せれば間違いはなくなる。間違えたときの言い訳を考える手間だけが人間に残る。",
];

const JA_SHORT_WORK: &[&str] = &[
    "{word}：責任を部下にクラウド化。",
    "{word}：やる気の前借りで回る職場の燃料。",
];

const JA_LONG_WORK: &[&str] = &[
    "{word}がある限り、責任は上から下へ、手柄は下から上へ、今日も正しく流れていく。",
    "{word}のおかげで定時という言葉は、就業規則の中でだけ大切に保管されている。",
];

const JA_SHORT_LOVE: &[&str] = &[
    "{word}：既読がつくまでの永遠。",
    "{word}：欠点を長所に見せる期間限定フィルター。",
];

const JA_LONG_LOVE: &[&str] = &[
    "{word}は最初は運命と呼ばれ、三か月後には相性と呼ばれ、一年後には条件と呼ばれる。",
    "{word}を語るとき、人は相手の話ではなく、自分がどう見られたいかの話をしている。",
];

const EN_SHORT_TECH: &[&str] = &[
    "{word}: automated reasons for humans to slack off.",
    "{word}: convenience that bills you in attention.",
];

const EN_LONG_TECH: &[&str] = &[
    "{word} saved us hours of work, and every saved hour went into training sessions about it.",
    "Thanks to {word}, mistakes are gone. Humans keep the only task that matters: explaining them.",
];

const EN_SHORT_WORK: &[&str] = &[
    "{word}: responsibility, cloud-hosted on subordinates.",
    "{word}: overtime with a motivational poster.",
];

const EN_LONG_WORK: &[&str] = &[
    "Under {word}, responsibility flows down and credit flows up, exactly as the org chart intended.",
    "Thanks to {word}, \"leaving on time\" is carefully preserved, but only in the employee handbook.",
];

const EN_SHORT_LOVE: &[&str] = &[
    "{word}: an eternity measured in read receipts.",
    "{word}: a limited-time filter that turns flaws into charm.",
];

const EN_LONG_LOVE: &[&str] = &[
    "{word} is called fate at first, compatibility after three months, and a list of conditions after a year.",
    "When people talk about {word}, they describe not the other person but how they want to be seen.",
];

const ZH_CN_SHORT_TECH: &[&str] = &[
    "{word}：自动生成人类偷懒的理由。",
    "{word}：用注意力付账的便利。",
];

const ZH_CN_LONG_TECH: &[&str] = &[
    "{word}帮我们省下了大量时间，省下的每一分钟都花在了学习怎么用它的培训上。",
    "有了{word}，错误消失了，人类只剩下一项工作：解释错误。",
];

const ZH_CN_SHORT_WORK: &[&str] = &[
    "{word}：把责任云端托管给下属。",
    "{word}：贴着励志海报的加班。",
];

const ZH_CN_LONG_WORK: &[&str] = &[
    "在{word}的体系里，责任往下流，功劳往上流，完全符合组织架构图的设计。",
    "多亏了{word}，“准时下班”被妥善保存着，不过只保存在员工手册里。",
];

const ZH_CN_SHORT_LOVE: &[&str] = &[
    "{word}：用已读回执计量的永恒。",
    "{word}：把缺点变成魅力的限时滤镜。",
];

const ZH_CN_LONG_LOVE: &[&str] = &[
    "{word}起初被叫作命运，三个月后叫作合适，一年后叫作条件。",
    "人们谈论{word}时，说的不是对方，而是自己想被怎样看待。",
];

const ZH_TW_SHORT_TECH: &[&str] = &[
    "{word}：自動生成人類偷懶的理由。",
    "{word}：用注意力付帳的便利。",
];

const ZH_TW_LONG_TECH: &[&str] = &[
    "{word}幫我們省下了大量時間，省下的每一分鐘都花在了學習怎麼用它的培訓上。",
    "有了{word}，錯誤消失了，人類只剩下一項工作：解釋錯誤。",
];

const ZH_TW_SHORT_WORK: &[&str] = &[
    "{word}：把責任雲端託管給下屬。",
    "{word}：貼著勵志海報的加班。",
];

const ZH_TW_LONG_WORK: &[&str] = &[
    "在{word}的體系裡，責任往下流，功勞往上流，完全符合組織圖的設計。",
    "多虧了{word}，「準時下班」被妥善保存著，不過只保存在員工手冊裡。",
];

const ZH_TW_SHORT_LOVE: &[&str] = &[
    "{word}：用已讀標記計量的永恆。",
    "{word}：把缺點變成魅力的限時濾鏡。",
];

const ZH_TW_LONG_LOVE: &[&str] = &[
    "{word}起初被叫作命運，三個月後叫作合適，一年後叫作條件。",
    "人們談論{word}時，說的不是對方，而是自己想被怎樣看待。",
];

const KO_SHORT_TECH: &[&str] = &[
    "{word}: 인간이 게으름 피울 이유를 자동 생성.",
    "{word}: 주의력으로 결제하는 편리함.",
];

const KO_LONG_TECH: &[&str] = &[
    "{word} 덕분에 많은 시간을 아꼈지만, 아낀 시간은 전부 그 사용법을 배우는 교육에 들어갔다.",
    "{word}이(가) 실수를 없애 주자 인간에게는 단 하나의 일만 남았다. 실수를 해명하는 일.",
];

const KO_SHORT_WORK: &[&str] = &[
    "{word}: 책임을 부하 직원에게 클라우드로 위탁.",
    "{word}: 동기부여 포스터가 붙은 야근.",
];

const KO_LONG_WORK: &[&str] = &[
    "{word} 아래에서 책임은 아래로, 공은 위로 흐른다. 조직도가 의도한 그대로.",
    "{word} 덕분에 '정시 퇴근'은 소중히 보관되고 있다. 취업 규칙 안에서만.",
];

const KO_SHORT_LOVE: &[&str] = &[
    "{word}: 읽음 표시로 재는 영원.",
    "{word}: 단점을 매력으로 바꾸는 기간 한정 필터.",
];

const KO_LONG_LOVE: &[&str] = &[
    "{word}은(는) 처음엔 운명, 석 달 뒤엔 궁합, 일 년 뒤엔 조건이라 불린다.",
    "사람들이 {word}을(를) 말할 때 이야기하는 것은 상대가 아니라 자신이 어떻게 보이고 싶은지다.",
];

static TEMPLATES: Lazy<TemplateTable> = Lazy::new(|| {
    let set = |tech, work, love, general| TemplateSet { tech, work, love, general };
    HashMap::from([
        ((Locale::Ja, LengthMode::Short), set(JA_SHORT_TECH, JA_SHORT_WORK, JA_SHORT_LOVE, JA_SHORT)),
        ((Locale::Ja, LengthMode::Long), set(JA_LONG_TECH, JA_LONG_WORK, JA_LONG_LOVE, JA_LONG)),
        ((Locale::En, LengthMode::Short), set(EN_SHORT_TECH, EN_SHORT_WORK, EN_SHORT_LOVE, EN_SHORT)),
        ((Locale::En, LengthMode::Long), set(EN_LONG_TECH, EN_LONG_WORK, EN_LONG_LOVE, EN_LONG)),
        (
            (Locale::ZhCn, LengthMode::Short),
            set(ZH_CN_SHORT_TECH, ZH_CN_SHORT_WORK, ZH_CN_SHORT_LOVE, ZH_CN_SHORT),
        ),
        (
            (Locale::ZhCn, LengthMode::Long),
            set(ZH_CN_LONG_TECH, ZH_CN_LONG_WORK, ZH_CN_LONG_LOVE, ZH_CN_LONG),
        ),
        (
            (Locale::ZhTw, LengthMode::Short),
            set(ZH_TW_SHORT_TECH, ZH_TW_SHORT_WORK, ZH_TW_SHORT_LOVE, ZH_TW_SHORT),
        ),
        (
            (Locale::ZhTw, LengthMode::Long),
            set(ZH_TW_LONG_TECH, ZH_TW_LONG_WORK, ZH_TW_LONG_LOVE, ZH_TW_LONG),
        ),
        ((Locale::Ko, LengthMode::Short), set(KO_SHORT_TECH, KO_SHORT_WORK, KO_SHORT_LOVE, KO_SHORT)),
        ((Locale::Ko, LengthMode::Long), set(KO_LONG_TECH, KO_LONG_WORK, KO_LONG_LOVE, KO_LONG)),
    ])
});

/// Candidate templates for a locale, length and category. Locales without
/// a table use the default locale's.
pub fn templates(locale: Locale, length: LengthMode, category: SatireCategory) -> &'static [&'static str] {
    TEMPLATES
        .get(&(locale, length))
        .or_else(|| TEMPLATES.get(&(Locale::default(), length)))
        .map(|set| set.for_category(category))
        .unwrap_or(&[])
}

// ============================================================================
// Category Detection
// ============================================================================

/// Satire category, scanned in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatireCategory {
    Tech,
    Work,
    Love,
    Society,
}

const TECH_KEYWORDS: &[&str] = &[
    "ai", "app", "apps", "tech", "robot", "robots", "smartphone", "sns", "crypto", "algorithm",
    "internet", "スマホ", "アプリ", "ロボット", "ネット", "人工知能", "テクノロジー", "仮想通貨",
    "人工智能", "科技", "手机", "手機", "机器人", "機器人", "网络", "網路",
    "스마트폰", "인공지능", "로봇", "기술",
];

const WORK_KEYWORDS: &[&str] = &[
    "boss", "office", "meeting", "meetings", "overtime", "salary", "manager", "work", "job", "jobs",
    "上司", "会社", "仕事", "残業", "会議", "部長", "社長", "給料",
    "老板", "加班", "会议", "會議", "公司", "工作", "薪水",
    "상사", "회사", "야근", "회의", "직장", "월급",
];

const LOVE_KEYWORDS: &[&str] = &[
    "love", "romance", "dating", "crush", "marriage",
    "恋", "愛", "結婚", "爱", "戀", "婚",
    "사랑", "연애", "결혼",
];

const CATEGORY_SCAN: &[(SatireCategory, &[&str])] = &[
    (SatireCategory::Tech, TECH_KEYWORDS),
    (SatireCategory::Work, WORK_KEYWORDS),
    (SatireCategory::Love, LOVE_KEYWORDS),
];

/// ASCII keywords that still match inside longer words
const SUBSTRING_KEYWORDS: &[&str] = &["ai"];

struct KeywordMatcher {
    category: SatireCategory,
    /// Non-ASCII and substring keywords, matched with `contains`
    fragments: Vec<&'static str>,
    /// Remaining ASCII keywords, matched on word boundaries
    words: Option<Regex>,
}

impl KeywordMatcher {
    fn new(category: SatireCategory, keywords: &'static [&'static str]) -> Self {
        let (ascii, fragments): (Vec<&'static str>, Vec<&'static str>) = keywords
            .iter()
            .copied()
            .partition(|kw| kw.is_ascii() && !SUBSTRING_KEYWORDS.contains(kw));

        let words = (!ascii.is_empty()).then(|| {
            let alternation = ascii.iter().map(|kw| regex::escape(kw)).collect::<Vec<_>>().join("|");
            Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
        });

        Self { category, fragments, words }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.fragments.iter().any(|kw| lowered.contains(kw))
            || self.words.as_ref().is_some_and(|re| re.is_match(lowered))
    }
}

static KEYWORD_MATCHERS: Lazy<Vec<KeywordMatcher>> = Lazy::new(|| {
    CATEGORY_SCAN
        .iter()
        .map(|&(category, keywords)| KeywordMatcher::new(category, keywords))
        .collect()
});

impl SatireCategory {
    /// First category whose keywords occur in the word; `Society` otherwise.
    ///
    /// ASCII keywords match case-insensitively on word boundaries, except
    /// `"ai"`, which matches anywhere. Other scripts match as substrings.
    pub fn detect(word: &str) -> Self {
        let lowered = word.to_lowercase();
        KEYWORD_MATCHERS
            .iter()
            .find(|matcher| matcher.matches(&lowered))
            .map(|matcher| matcher.category)
            .unwrap_or(Self::Society)
    }

    pub fn label(self, locale: Locale) -> String {
        let locale = locale.code();
        match self {
            Self::Tech => t!("category.tech", locale = locale),
            Self::Work => t!("category.work", locale = locale),
            Self::Love => t!("category.love", locale = locale),
            Self::Society => t!("category.society", locale = locale),
        }
        .into_owned()
    }
}

/// Label used when the model omits `type`
pub fn default_category_label(locale: Locale) -> String {
    SatireCategory::Society.label(locale)
}

// ============================================================================
// Generator
// ============================================================================

/// Build a fallback result.
///
/// The category is detected first; the template list is then fixed by
/// `(locale, length, category)` and one entry is picked uniformly with
/// `rng`. An empty word gets the locale's fixed blank line.
pub fn generate<R: Rng + ?Sized>(params: &RequestParameters, rng: &mut R) -> SatireResult {
    let word = params.word.trim();
    if word.is_empty() {
        return SatireResult {
            satire: params.locale.blank_line(),
            category: default_category_label(params.locale),
        };
    }

    let category = SatireCategory::detect(word);
    let template = templates(params.locale, params.length, category)
        .choose(rng)
        .copied()
        .unwrap_or(WORD_SLOT);

    SatireResult { satire: template.replacen(WORD_SLOT, word, 1), category: category.label(params.locale) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StyleMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL_LOCALES: [Locale; 5] = [Locale::Ja, Locale::En, Locale::ZhCn, Locale::ZhTw, Locale::Ko];
    const ALL_CATEGORIES: [SatireCategory; 4] =
        [SatireCategory::Tech, SatireCategory::Work, SatireCategory::Love, SatireCategory::Society];

    fn params(word: &str, length: LengthMode, locale: Locale) -> RequestParameters {
        RequestParameters { word: word.to_string(), length, style: StyleMode::Printer, locale }
    }

    fn from_templates(satire: &str, list: &[&str], word: &str) -> bool {
        list.iter().any(|t| t.replacen(WORD_SLOT, word, 1) == satire)
    }

    #[test]
    fn test_every_template_has_one_slot() {
        for locale in ALL_LOCALES {
            for length in [LengthMode::Short, LengthMode::Long] {
                for category in ALL_CATEGORIES {
                    let list = templates(locale, length, category);
                    assert!(!list.is_empty(), "{locale} {length:?} {category:?} has no templates");
                    for template in list {
                        assert_eq!(template.matches(WORD_SLOT).count(), 1, "{template}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_generated_line_contains_word() {
        let mut rng = StdRng::seed_from_u64(7);
        for locale in ALL_LOCALES {
            for _ in 0..20 {
                let out = generate(&params("上司", LengthMode::Long, locale), &mut rng);
                assert!(out.satire.contains("上司"));
                assert!(!out.satire.contains(WORD_SLOT));
                let list = templates(locale, LengthMode::Long, SatireCategory::Work);
                assert!(from_templates(&out.satire, list, "上司"), "{}", out.satire);
            }
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let p = params("AI", LengthMode::Short, Locale::En);
        let a = generate(&p, &mut StdRng::seed_from_u64(42));
        let b = generate(&p, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_style_does_not_change_selection() {
        let mut printer = params("会議", LengthMode::Short, Locale::Ja);
        let mut smile = printer.clone();
        printer.style = StyleMode::Printer;
        smile.style = StyleMode::Smile;
        assert_eq!(
            generate(&printer, &mut StdRng::seed_from_u64(3)),
            generate(&smile, &mut StdRng::seed_from_u64(3))
        );
    }

    #[test]
    fn test_empty_word_uses_blank_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = generate(&params("   ", LengthMode::Short, Locale::Ja), &mut rng);
        assert_eq!(out.satire, "空白：一番誤魔化しやすい答え。");
        assert_eq!(out.category, "社会風刺");

        let out = generate(&params("", LengthMode::Long, Locale::En), &mut rng);
        assert_eq!(out.satire, "Nothing: the easiest answer to fudge.");
        assert_eq!(out.category, "Social satire");
    }

    #[test]
    fn test_topic_lines_for_known_words() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let out = generate(&params("AI", LengthMode::Short, Locale::Ja), &mut rng);
            assert!(from_templates(&out.satire, JA_SHORT_TECH, "AI"), "{}", out.satire);
            assert_eq!(out.category, "テクノロジー風刺");

            let out = generate(&params("上司", LengthMode::Short, Locale::Ja), &mut rng);
            assert!(from_templates(&out.satire, JA_SHORT_WORK, "上司"), "{}", out.satire);

            let out = generate(&params("お金", LengthMode::Short, Locale::Ja), &mut rng);
            assert!(from_templates(&out.satire, JA_SHORT, "お金"), "{}", out.satire);
            assert_eq!(out.category, "社会風刺");
        }
    }

    #[test]
    fn test_category_detection_order() {
        assert_eq!(SatireCategory::detect("AI"), SatireCategory::Tech);
        assert_eq!(SatireCategory::detect("上司"), SatireCategory::Work);
        assert_eq!(SatireCategory::detect("恋人"), SatireCategory::Love);
        assert_eq!(SatireCategory::detect("天気"), SatireCategory::Society);
        // technology wins over romance
        assert_eq!(SatireCategory::detect("AIとの恋"), SatireCategory::Tech);
        // workplace wins over romance
        assert_eq!(SatireCategory::detect("上司の愛"), SatireCategory::Work);
        assert_eq!(SatireCategory::detect("Dating APP"), SatireCategory::Tech);
    }

    #[test]
    fn test_english_keywords_need_word_boundaries() {
        assert_eq!(SatireCategory::detect("happiness"), SatireCategory::Society);
        assert_eq!(SatireCategory::detect("glove"), SatireCategory::Society);
        assert_eq!(SatireCategory::detect("jobless"), SatireCategory::Society);
        assert_eq!(SatireCategory::detect("my Boss"), SatireCategory::Work);
        assert_eq!(SatireCategory::detect("first love"), SatireCategory::Love);
        assert_eq!(SatireCategory::detect("office-party"), SatireCategory::Work);
        // "ai" keeps matching inside longer words
        assert_eq!(SatireCategory::detect("OpenAI"), SatireCategory::Tech);
    }

    #[test]
    fn test_category_labels_follow_locale() {
        assert_eq!(SatireCategory::Work.label(Locale::Ja), "仕事風刺");
        assert_eq!(SatireCategory::Tech.label(Locale::En), "Tech satire");
        assert_eq!(SatireCategory::Love.label(Locale::ZhTw), "戀愛諷刺");
        assert_eq!(SatireCategory::Society.label(Locale::ZhCn), "社会讽刺");
        assert_eq!(default_category_label(Locale::Ko), "사회 풍자");
    }
}
