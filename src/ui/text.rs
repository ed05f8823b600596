//! Fixed user-facing reply strings. Plain replies are sent without a parse
//! mode; styled message bodies are assembled in `ui::format` with escaping.

pub const START: &str = "👋 أهلاً! هذا بوت Genshin:\n\
/register — ربط الحساب (cookies أو login)\n\
/setuid <UID>\n\
/setcookies <القيم الأربع>\n\
/daily أو /resin — الملاحظات اليومية\n\
/abyss [prev] — نتائج Spiral Abyss\n\
/diary — سجل الموارد\n\
/characters — شخصياتك\n\
/profile — بيانات الحساب\n\
/daily_rewards — مكافآت تسجيل الدخول\n\
/card [uid] — بطاقة اللاعب";

pub const NOT_REGISTERED: &str = "❌ أنت غير مسجل. استخدم /register أولاً في الخاص.";
pub const UID_NOT_SET: &str = "⚠️ UID غير مضبوط. استخدم /setuid 800123456";
pub const SESSION_EXPIRED: &str =
    "⚠️ انتهت صلاحية الجلسة. استخدم /register أو /setcookies لتحديث بيانات الدخول.";
pub const REMOTE_FAILURE: &str = "❌ حدث خطأ أثناء جلب البيانات. حاول مجددًا لاحقًا.";
pub const ALREADY_CLAIMED: &str = "⚠️ تم المطالبة بالمكافأة اليومية بالفعل اليوم.";

pub const REGISTER_PROMPT: &str = "👤 تسجيل المستخدم:\nاختر الطريقة:\n1️⃣ cookies\n2️⃣ login";
pub const REGISTER_METHOD_RETRY: &str = "❌ الرجاء كتابة 'cookies' أو 'login'.";
pub const REGISTER_COOKIES_PROMPT: &str =
    "📌 أدخل الكوكيز بالترتيب: ltuid_v2, ltoken_v2, ltmid_v2, cookie_token_v2\nافصل بين كل قيمة بفاصلة.";
pub const REGISTER_COOKIES_RETRY: &str = "❌ الرجاء إدخال جميع القيم الأربع للكوكيز.";
pub const REGISTER_EMAIL_PROMPT: &str = "📌 أدخل البريد الإلكتروني:";
pub const REGISTER_PASSWORD_PROMPT: &str = "📌 أدخل كلمة المرور:";

pub const SETUID_USAGE: &str = "استخدم: /setuid 800123456";
pub const SETUID_INVALID: &str = "UID غير صالح.";
pub const SETCOOKIES_USAGE: &str =
    "استخدم: /setcookies ltuid_v2,ltoken_v2,ltmid_v2,cookie_token_v2";
pub const COOKIES_SAVED: &str = "✅ تم ربط الكوكيز (v2)";

pub const CHOOSE_PERIOD: &str = "اختر الفترة الزمنية:";

pub const BTN_ABYSS_PREVIOUS: &str = "⬅ السابق";
pub const BTN_ABYSS_CURRENT: &str = "➡ الحالي";
pub const BTN_PRIMOGEMS: &str = "💎 Primogems";
pub const BTN_MORA: &str = "💰 Mora";
pub const BTN_PERIOD_WEEK: &str = "🗓 آخر أسبوع";
pub const BTN_PERIOD_MONTH: &str = "📅 آخر شهر";
pub const BTN_PERIOD_3MONTHS: &str = "📆 آخر 3 أشهر";
pub const BTN_CLAIM_DAILY: &str = "🎁 المطالبة بالمكافأة اليومية";
pub const BTN_VIEW_CLAIMED: &str = "📜 عرض المكافآت المطالبة";
