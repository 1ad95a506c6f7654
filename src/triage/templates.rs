// Reply template banks and fixed safety messages

/// Replies for suicidal ideation. Also used as the mandatory override for
/// generated text whenever this category is detected.
pub const SUICIDAL_IDEATION: &[&str] = &[
    "I'm deeply concerned about what you're sharing with me. Your life has incredible value, and you deserve support and care. Please know that you're not alone in this darkness, even when it feels that way.\n\n**Please reach out for immediate help:**\n- Call **988** (Suicide & Crisis Lifeline) - Available 24/7\n- Text **HOME to 741741** (Crisis Text Line)\n- Call **911** if you're in immediate danger\n\nWould you like to talk about what's been making you feel this way? I'm here to listen.",
    "What you're sharing is really serious, and I'm glad you're talking about it. These feelings can be overwhelming, but there are people who can help you through this right now.\n\n**Immediate resources:**\n- **988** - Suicide & Crisis Lifeline (call or text)\n- **741741** - Text HOME for Crisis Text Line\n- **911** - For emergencies\n\nYou don't have to go through this alone. Can you tell me what's been happening?",
];

pub const SELF_HARM: &[&str] = &[
    "I hear that you're struggling with urges to hurt yourself, and that must be incredibly difficult to deal with. Your safety and wellbeing are so important.\n\nHave you been able to talk to anyone about these feelings? A counselor or therapist could provide you with strategies to cope with these urges. The Crisis Text Line (text HOME to 741741) is also available 24/7.\n\nWhat do you usually feel right before these urges come up?",
    "Thank you for trusting me enough to share this. Self-harm urges can be really intense and scary. You deserve compassionate support, not judgment.\n\nSome people find it helps to:\n- Hold ice cubes\n- Snap a rubber band on your wrist\n- Draw on yourself with red marker\n- Talk to someone immediately\n\nWould you like to talk about what triggers these feelings for you?",
];

pub const TRAUMA: &[&str] = &[
    "Thank you for sharing something so difficult. Trauma can leave deep marks, and healing isn't linear - it's okay if you're still struggling with what happened.\n\nYou deserve professional support from someone trained in trauma therapy. They can help you process these experiences in a safe way.\n\nHow are you coping with these feelings right now?",
    "What you experienced was real and difficult, and your reactions to it are completely valid. Trauma can affect us in so many ways - flashbacks, nightmares, anxiety, and more.\n\nHealing is possible, though it takes time and support. A trauma-informed therapist can provide you with tools to process what happened.\n\nDo you have support in your life right now?",
];

pub const DEPRESSION: &[&str] = &[
    "I hear that you're going through a really tough time right now. Depression can make everything feel so heavy and exhausting, and I want you to know that your feelings are completely valid.\n\nYou don't have to face this alone. Many people have walked this path and found their way through with support.\n\nWhat's been the hardest part for you lately?",
    "It sounds like you're carrying a lot of weight right now. Depression can make even simple things feel impossible, and that's not your fault.\n\nRemember:\n- These feelings, however intense, are temporary\n- You deserve compassion, especially from yourself\n- Small steps count as progress\n- Professional help can make a real difference\n\nWhat does your day-to-day look like right now?",
    "I'm really glad you're sharing this with me. Depression can be so isolating, and talking about it takes courage.\n\nHave you been able to talk to a doctor or therapist about how you're feeling? They can help create a plan to support you, whether that's therapy, medication, lifestyle changes, or a combination.\n\nHow long have you been feeling this way?",
];

pub const ANXIETY: &[&str] = &[
    "It sounds like you're experiencing a lot of anxiety right now. That racing, overwhelmed feeling can be so exhausting and uncomfortable.\n\nLet's take a moment together - can you try breathing in slowly for 4 counts, holding for 4, then out for 4? You're safe in this moment.\n\nWhat's been triggering these anxious feelings for you?",
    "Anxiety can feel so overwhelming, like your mind and body are in overdrive. I want you to know that what you're experiencing is real, and there are ways to manage it.\n\nSome things that might help right now:\n- Deep, slow breathing\n- Grounding yourself (name 5 things you can see, 4 you can touch, 3 you can hear)\n- Moving your body, even just a short walk\n\nWhat usually helps you when you feel this way?",
    "I hear you, and anxiety like this can be really frightening. Your mind might be racing with 'what ifs' and worst-case scenarios.\n\nRemember: anxiety lies. It makes everything seem more dangerous than it really is. You've gotten through anxious moments before, and you can get through this one too.\n\nWhat are you most worried about right now?",
];

pub const STRESS: &[&str] = &[
    "You're dealing with a lot of stress, and that's completely understandable. When everything piles up, it can feel like you're drowning in responsibilities and pressure.\n\nIt's okay to feel overwhelmed. That feeling is your mind and body telling you that you need some support and maybe a break.\n\nWhat's been weighing on you the most?",
    "Stress can build up until it feels like too much to handle. I'm glad you're talking about it - sometimes just sharing the burden can help lighten the load a little.\n\nHave you been able to take any time for yourself lately? Even small moments of rest matter.\n\nWhat would help you feel a bit lighter right now?",
];

pub const GENERAL: &[&str] = &[
    "Thank you for sharing that with me. I'm here to listen and support you, without any judgment. Your feelings and experiences are valid.\n\nTell me more about what's been on your mind.",
    "I appreciate you opening up. It takes courage to talk about what we're going through, especially during difficult times.\n\nHow are you feeling right now in this moment?",
    "I hear you, and I want you to know that you're not alone in what you're experiencing. Many people go through similar struggles, even if it doesn't always feel that way.\n\nWhat would be most helpful for you to talk about?",
    "That sounds really challenging. I'm glad you're here talking about it rather than keeping it all inside.\n\nWhat's been the hardest part of this for you?",
    "Your feelings are completely valid, and I'm here to support you through this. Sometimes just having someone listen can make a difference.\n\nWhat else has been going on?",
];

pub const POSITIVE: &[&str] = &[
    "I'm glad to hear things are going a bit better! It's important to acknowledge and celebrate the good moments, even small ones.\n\nWhat's been helping you feel better?",
    "That's wonderful to hear. Taking care of your mental health is so important, and it sounds like you're making positive steps.\n\nHow can I support you today?",
];

pub const GREETING: &[&str] = &[
    "Hello! I'm here to listen and support you. This is a safe, judgment-free space. How are you feeling today?",
    "Hi there! I'm glad you're here. This is a safe space where you can share whatever is on your mind. How are you doing?",
    "Welcome! I'm here to provide support and listen without judgment. What's been on your mind lately?",
];

/// Used only if a bank is somehow empty; never a blank reply
pub const LAST_RESORT_REPLY: &str =
    "I'm here with you and I'm listening. Can you tell me a little more about how you're feeling?";

/// Shown after every reply while the session is at critical risk
pub const CRISIS_BANNER: &str = "Your responses indicate you may be in crisis. Please reach out for immediate help.\nCall 988 (Suicide & Crisis Lifeline) or 911 for emergencies.";

pub const CRISIS_RESOURCES: &str = "Crisis Resources\n\
    - Suicide & Crisis Lifeline: 988 (US) - 24/7 support\n\
    - Crisis Text Line: text HOME to 741741\n\
    - Emergency: 911\n\
    - International: findahelpline.com";

pub const SOS_MESSAGE: &str = "If you're in immediate danger, please call 911 or go to your nearest emergency room.\n\
    Call 988 for the Suicide & Crisis Lifeline (24/7).\n\
    Text HOME to 741741 for the Crisis Text Line.";

pub const WELCOME: &str = "Hello! I'm here to listen and support you.\n\n\
    This is a safe, judgment-free space where you can share what's on your mind.\n\
    How are you feeling today?";

pub const ABOUT: &str = "MindCare is a mental health support tool designed to:\n\
    - Provide emotional support\n\
    - Detect concerning patterns\n\
    - Offer resources and guidance\n\
    - Connect you with professional help\n\n\
    Important: this is a support tool, not a replacement for professional mental health care.";
