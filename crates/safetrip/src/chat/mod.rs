//! Offline support chat that answers from an ordered list of keyword rules.

use serde::Serialize;

/// Opening message shown before the user writes anything.
pub const GREETING: &str = "Hello, I'm here to provide a safe, anonymous space to discuss relationship concerns. Everything you share here is completely private and confidential. How can I help you today?";

const FALLBACK: &str = "I hear you, and I want you to know that your feelings and concerns are valid. It's important to trust your instincts about your relationships and safety. If you're comfortable sharing more details about what's concerning you, I can try to provide more specific guidance. Remember, healthy relationships should make you feel safe, respected, and supported. Is there a particular situation or behavior that's been troubling you?";

/// Reply chosen when any keyword occurs in the lower-cased message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
    pub urgent: bool,
}

impl ResponseRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedReply {
    pub content: &'static str,
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponder {
    rules: Vec<ResponseRule>,
    fallback: &'static str,
}

impl CannedResponder {
    pub fn new(rules: Vec<ResponseRule>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    /// Danger first, then control, travel, relationship and help-seeking topics.
    pub fn standard() -> Self {
        Self::new(standard_rules(), FALLBACK)
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    /// First matching rule wins. Blank messages get no reply.
    pub fn reply(&self, message: &str) -> Option<CannedReply> {
        let normalized = message.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let reply = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| CannedReply {
                content: rule.reply,
                urgent: rule.urgent,
            })
            .unwrap_or(CannedReply {
                content: self.fallback,
                urgent: false,
            });

        Some(reply)
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_rules() -> Vec<ResponseRule> {
    vec![
        ResponseRule {
            keywords: &["hurt", "violence", "afraid", "threat", "hit", "abuse"],
            reply: "I'm very concerned about what you're sharing. Your safety is the most important thing right now. If you're in immediate danger, please call 911 or your local emergency services. You can also contact the National Domestic Violence Hotline at 1-800-799-7233 (available 24/7). They have trained counselors who can help you create a safety plan. Would you like me to provide some immediate safety resources?",
            urgent: true,
        },
        ResponseRule {
            keywords: &["control", "phone", "money", "friends", "family", "isolat"],
            reply: "What you're describing sounds like controlling behavior, which can be a serious warning sign in relationships. Healthy relationships are built on mutual respect and trust, not control. Partners should support your connections with friends and family, not limit them. Have you noticed these controlling behaviors getting worse over time? It might be helpful to talk to a trusted friend, family member, or counselor about what you're experiencing.",
            urgent: false,
        },
        ResponseRule {
            keywords: &["trip", "travel", "honeymoon", "vacation", "destination"],
            reply: "It's important that you feel completely comfortable and safe about any travel plans. In healthy relationships, both partners should be involved in planning and have access to all travel information. Red flags include: secretive planning, discouraging you from telling others about the trip, controlling access to travel documents or money, or choosing very isolated locations against your wishes. What specific concerns do you have about your upcoming travel?",
            urgent: false,
        },
        ResponseRule {
            keywords: &["relationship", "partner", "boyfriend", "girlfriend", "husband", "wife"],
            reply: "Thank you for sharing your concerns. Healthy relationships should make you feel supported, respected, and safe. Warning signs to watch for include: attempts to isolate you from others, controlling your activities or finances, extreme jealousy, verbal or emotional abuse, and any form of physical intimidation. Trust your instincts - if something feels wrong, it's worth exploring those feelings. What specific behaviors or situations are concerning you?",
            urgent: false,
        },
        ResponseRule {
            keywords: &["help", "what should i do", "advice"],
            reply: "I'm glad you're reaching out for support - that takes courage. Here are some steps you can consider: 1) Trust your instincts about your situation, 2) Talk to trusted friends or family members, 3) Contact a domestic violence hotline for professional guidance (1-800-799-7233), 4) Consider speaking with a counselor or therapist, 5) Create a safety plan if you feel you might be in danger. Remember, you deserve to be in a relationship that feels safe and supportive. What feels like the most important next step for you right now?",
            urgent: false,
        },
    ]
}
