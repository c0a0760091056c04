//! User-facing reply texts.

use crate::session::{Action, CallerId};

pub const WELCOME: &str = "<b>مرحباً بك في البوت العالمي!</b> 🌍

يمكنك استخدام الأزرار أدناه للوصول إلى جميع الخدمات:

• <b>انشاء صور</b>: توليد صور بالذكاء الاصطناعي
• <b>ذكاء اصطناعيّ</b>: محادثة مع الذكاء الاصطناعي
• <b>ترجمه نص</b>: ترجمة النص إلى لغات متعددة
• <b>المواقع المدمجة</b>: مواقع تعمل داخل البوت";

pub const SITES_HEADER: &str = "<b>المواقع المدمجة 🌐</b>

اختر أحد المواقع التالية لفتحها:";

pub const SITE_UNAVAILABLE: &str = "❌ الموقع المطلوب غير متوفر حالياً";
pub const SITE_FAILED: &str = "❌ حدث خطأ أثناء فتح الموقع. يرجى المحاولة لاحقًا.";
pub const UNEXPECTED: &str = "❌ حدث خطأ غير متوقع. يرجى المحاولة مرة أخرى.";

pub const IMAGE_CAPTION: &str = "ها هي صورتك المطلوبة 🎨";
pub const ANSWER_HEADER: &str = "🤖 الذكاء الاصطناعي:";
pub const TRANSLATION_HEADER: &str = "🌍 الترجمة:";
pub const CONTACT_SENT: &str = "✅ تم إرسال رسالتك إلى المطور. شكرًا لك!";

/// Fixed texts shown around one action.
#[derive(Debug, Clone, Copy)]
pub struct ActionTexts {
    /// Shown while the outbound call runs; `None` for local actions.
    pub progress: Option<&'static str>,
    /// Reply when the service returned no payload.
    pub empty: &'static str,
    /// Reply when the call failed.
    pub failed: &'static str,
}

const IMAGE: ActionTexts = ActionTexts {
    progress: Some("⏳ جاري توليد الصورة، الرجاء الانتظار..."),
    empty: "❌ عذرًا، لم أتمكن من توليد الصورة. يرجى المحاولة بوصف مختلف.",
    failed: "❌ حدث خطأ أثناء توليد الصورة. يرجى المحاولة لاحقًا.",
};

const ASK_AI: ActionTexts = ActionTexts {
    progress: Some("🤔 جاري التفكير في الإجابة..."),
    empty: "❌ لم أتمكن من فهم سؤالك. يرجى إعادة الصياغة.",
    failed: "❌ حدث خطأ أثناء معالجة سؤالك. يرجى المحاولة لاحقًا.",
};

const TRANSLATE: ActionTexts = ActionTexts {
    progress: Some("🔄 جاري الترجمة..."),
    empty: "❌ لم أتمكن من ترجمة النص. يرجى المحاولة بنص آخر.",
    failed: "❌ حدث خطأ أثناء الترجمة. يرجى المحاولة لاحقًا.",
};

const CONTACT: ActionTexts = ActionTexts {
    progress: None,
    empty: "❌ حدث خطأ أثناء إرسال رسالتك. يرجى المحاولة لاحقًا.",
    failed: "❌ حدث خطأ أثناء إرسال رسالتك. يرجى المحاولة لاحقًا.",
};

pub fn for_action(action: Action) -> &'static ActionTexts {
    match action {
        Action::GenerateImage => &IMAGE,
        Action::AskAi => &ASK_AI,
        Action::Translate => &TRANSLATE,
        Action::ContactDeveloper => &CONTACT,
    }
}

/// Prompt asking for the action's follow-up input.
pub fn prompt(action: Action, developer_username: &str) -> String {
    match action {
        Action::GenerateImage => {
            "📝 أرسل لي وصف الصورة التي تريد توليدها (باللغة الإنجليزية للحصول على نتائج أفضل)"
                .to_string()
        }
        Action::AskAi => "🧠 أرسل لي سؤالك أو استفسارك وسأحاول الإجابة عليه".to_string(),
        Action::Translate => {
            "💬 أرسل النص الذي تريد ترجمته (سيتم ترجمته من الإنجليزية إلى العربية)".to_string()
        }
        Action::ContactDeveloper => format!(
            "📬 للتواصل مع المطور:\n\nيمكنك مراسلة المطور مباشرة عبر: {developer_username}\n\nأو أرسل رسالتك هنا وسيتم إرسالها للمطور:"
        ),
    }
}

pub fn answer(answer: &str) -> String {
    format!("{ANSWER_HEADER}\n\n{answer}")
}

pub fn translation(translated: &str) -> String {
    format!("{TRANSLATION_HEADER}\n\n{translated}")
}

/// Message forwarded to the operator chat.
pub fn operator_forward(message: &str, caller: CallerId) -> String {
    format!("📩 رسالة جديدة من المستخدم:\n\n{message}\n\nمعرف المستخدم: {caller}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_actions_have_progress() {
        for action in Action::ALL {
            assert_eq!(for_action(action).progress.is_some(), action.is_remote());
        }
    }

    #[test]
    fn test_contact_prompt_names_developer() {
        let text = prompt(Action::ContactDeveloper, "@someone");
        assert!(text.contains("@someone"));
    }

    #[test]
    fn test_operator_forward() {
        let text = operator_forward("hi there", CallerId::from_raw(42));
        assert!(text.contains("hi there"));
        assert!(text.ends_with("42"));
    }

    #[test]
    fn test_reply_headers() {
        assert!(answer("x").starts_with(ANSWER_HEADER));
        assert!(translation("مرحبا").ends_with("مرحبا"));
    }
}
