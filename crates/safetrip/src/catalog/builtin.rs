use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{
    ChecklistCategory, ChecklistItem, IncidentId, IncidentRecord, ItemId, QuestionId,
    QuizQuestion, RiskZone, Severity, ZoneId,
};
use super::CatalogDocument;
use crate::resources::{EmergencyDirectory, Hotline, SafetyGuide};

pub(crate) fn document() -> CatalogDocument {
    CatalogDocument {
        questions: questions(),
        checklist: checklist(),
        zones: zones(),
        incidents: incidents(),
        directory: directory(),
        guides: guides(),
    }
}

fn question(id: u32, weight: u32, text: &str) -> QuizQuestion {
    QuizQuestion {
        id: QuestionId(id),
        text: text.to_string(),
        weight,
    }
}

fn questions() -> Vec<QuizQuestion> {
    vec![
        question(1, 3, "Does your partner insist on planning the entire trip alone without your input?"),
        question(2, 4, "Do they hide their phone, computer, or travel history from you?"),
        question(3, 3, "Have they been secretive about the destination or accommodations?"),
        question(4, 5, "Do they discourage you from telling friends or family about your trip plans?"),
        question(5, 4, "Have they insisted on a very remote or isolated location?"),
        question(6, 5, "Do they control your access to money or travel documents?"),
        question(7, 3, "Have they shown signs of jealousy or possessiveness recently?"),
        question(8, 4, "Do they get angry when you ask questions about the trip details?"),
        question(9, 4, "Have they discouraged you from bringing your own transportation or phone?"),
        question(10, 5, "Do they have a history of controlling or manipulative behavior?"),
        question(11, 5, "Have they made threats (even seemingly joking ones) about the trip?"),
        question(12, 4, "Do they dismiss your concerns or call you paranoid when you ask questions?"),
    ]
}

fn item(id: u32, critical: bool, text: &str, explanation: &str) -> ChecklistItem {
    ChecklistItem {
        id: ItemId(id),
        text: text.to_string(),
        critical,
        explanation: explanation.to_string(),
    }
}

fn category(name: &str, items: Vec<ChecklistItem>) -> ChecklistCategory {
    ChecklistCategory {
        name: name.to_string(),
        items,
    }
}

fn checklist() -> Vec<ChecklistCategory> {
    vec![
        category(
            "Pre-Travel Communication",
            vec![
                item(1, true, "Does your partner openly discuss travel plans and destination?",
                    "Secrecy about travel plans can be a major warning sign. Partners should openly share itineraries, accommodations, and activities."),
                item(2, true, "Are you allowed to share travel plans with family and friends?",
                    "Isolation tactics often start with discouraging communication with your support network."),
                item(3, false, "Can you access and review travel bookings and reservations?",
                    "You should have access to confirm accommodations, transportation, and activities for your own safety."),
                item(4, false, "Have you researched the destination independently?",
                    "Understanding your destination, local customs, and safety considerations is important."),
            ],
        ),
        category(
            "Financial Independence",
            vec![
                item(5, true, "Do you have access to your own money/credit cards?",
                    "Financial control is a common abuse tactic. You should always have independent access to funds."),
                item(6, true, "Do you have emergency cash that your partner doesn't know about?",
                    "Emergency funds provide crucial independence and escape options if needed."),
                item(7, false, "Can you make purchases without needing permission?",
                    "Financial autonomy is a basic right in healthy relationships."),
            ],
        ),
        category(
            "Communication & Documentation",
            vec![
                item(8, true, "Do you have unrestricted access to your phone?",
                    "Phone monitoring or restrictions are serious red flags for controlling behavior."),
                item(9, true, "Have you shared your itinerary with trusted contacts?",
                    "Multiple people should know your travel plans and expected return."),
                item(10, false, "Do you have copies of important documents (ID, passport, etc.)?",
                    "Document control is another form of isolation. Keep copies in a safe, accessible place."),
                item(11, false, "Have you established check-in times with trusted contacts?",
                    "Regular check-ins provide accountability and early warning if something goes wrong."),
            ],
        ),
        category(
            "Personal Safety",
            vec![
                item(12, false, "Do you know the local emergency numbers for your destination?",
                    "Emergency numbers vary by country. Research and save them before traveling."),
                item(13, false, "Have you researched safe places (hospitals, police stations) at your destination?",
                    "Knowing safe locations provides escape options if needed."),
                item(14, true, "Do you have a safety plan if something goes wrong?",
                    "Having a clear safety plan can save crucial time in emergency situations."),
                item(15, false, "Are you comfortable with all planned activities?",
                    "You should never feel pressured into activities that make you uncomfortable."),
            ],
        ),
        category(
            "Trust Your Instincts",
            vec![
                item(16, false, "Do you feel genuinely excited about this trip?",
                    "Trust your gut feelings. Anxiety or dread about a trip may indicate underlying concerns."),
                item(17, true, "Would you feel comfortable if a friend was in your situation?",
                    "Sometimes it's easier to see red flags when we imagine them happening to someone we care about."),
                item(18, true, "Do you trust your partner completely?",
                    "Travel requires vulnerability. Complete trust is essential for safety."),
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn zone(
    id: u32,
    name: &str,
    lat: f64,
    lng: f64,
    radius_km: f64,
    severity: Severity,
    description: &str,
    incident_count: u32,
) -> RiskZone {
    RiskZone {
        id: ZoneId(id),
        name: name.to_string(),
        lat,
        lng,
        radius_km,
        severity,
        description: description.to_string(),
        incident_count,
    }
}

fn zones() -> Vec<RiskZone> {
    vec![
        zone(1, "Multnomah Falls, Oregon", 45.5762, -122.1158, 5.0, Severity::High,
            "Remote waterfall location with limited cell service and few witnesses", 3),
        zone(2, "Antelope Canyon, Arizona", 36.8619, -111.3743, 10.0, Severity::High,
            "Isolated slot canyon requiring guided tours, easy to become separated", 2),
        zone(3, "Hoh Rainforest, Washington", 47.8021, -123.9348, 15.0, Severity::Moderate,
            "Dense forest with limited visibility and cell service", 1),
        zone(4, "Death Valley, California", 36.5054, -117.0794, 50.0, Severity::High,
            "Extremely remote desert location with dangerous conditions", 4),
        zone(5, "Glacier National Park Remote Areas, Montana", 48.7596, -113.7870, 25.0, Severity::Moderate,
            "Backcountry areas with wildlife and limited rescue access", 2),
        zone(6, "Big Sur Coastline, California", 36.2704, -121.8081, 20.0, Severity::Moderate,
            "Rugged coastline with steep cliffs and isolated beaches", 3),
    ]
}

#[allow(clippy::too_many_arguments)]
fn incident(
    id: u32,
    lat: f64,
    lng: f64,
    location: &str,
    kind: &str,
    date: (i32, u32, u32),
    description: &str,
    severity: Severity,
    verified: bool,
) -> IncidentRecord {
    let (year, month, day) = date;
    IncidentRecord {
        id: IncidentId(id),
        lat,
        lng,
        location: location.to_string(),
        kind: kind.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        description: description.to_string(),
        severity,
        verified,
    }
}

fn incidents() -> Vec<IncidentRecord> {
    vec![
        incident(1, 45.5762, -122.1158, "Multnomah Falls, Oregon", "Missing Person", (2023, 8, 15),
            "Tourist reported missing during hiking trip, found safe after 3 days", Severity::High, true),
        incident(2, 36.8619, -111.3743, "Antelope Canyon, Arizona", "Domestic Incident", (2023, 6, 22),
            "Reported domestic disturbance at tourist location", Severity::High, true),
        incident(3, 47.8021, -123.9348, "Hoh Rainforest, Washington", "Safety Concern", (2023, 7, 10),
            "Visitor reported feeling unsafe due to isolated conditions", Severity::Moderate, false),
        incident(4, 36.5054, -117.0794, "Death Valley, California", "Emergency Rescue", (2023, 9, 3),
            "Multiple rescues due to extreme conditions and poor preparation", Severity::High, true),
        incident(5, 48.7596, -113.7870, "Glacier National Park, Montana", "Safety Incident", (2023, 7, 28),
            "Backcountry safety incident reported by park services", Severity::Moderate, true),
        incident(6, 36.2704, -121.8081, "Big Sur, California", "Missing Person", (2023, 5, 17),
            "Hiker went missing on coastal trail, search ongoing", Severity::High, true),
        incident(7, 44.4280, -110.5885, "Yellowstone National Park, Wyoming", "Safety Concern", (2023, 8, 1),
            "Tourist safety concerns reported in remote thermal areas", Severity::Moderate, true),
        incident(8, 36.1069, -112.1129, "Grand Canyon, Arizona", "Emergency Rescue", (2023, 6, 15),
            "Multiple rescue operations on remote canyon trails", Severity::High, true),
    ]
}

fn hotline(name: &str, number: &str, description: &str) -> Hotline {
    Hotline {
        name: name.to_string(),
        number: number.to_string(),
        description: description.to_string(),
    }
}

fn directory() -> EmergencyDirectory {
    let mut regional = BTreeMap::new();
    regional.insert(
        "California".to_string(),
        vec![hotline("CA Domestic Violence Hotline", "1-800-524-4765", "State-specific resources")],
    );
    regional.insert(
        "New York".to_string(),
        vec![hotline("NY State Domestic Violence Hotline", "1-800-942-6906", "State-specific resources")],
    );
    regional.insert(
        "Texas".to_string(),
        vec![hotline("TX Council on Family Violence", "1-800-525-1978", "State-specific resources")],
    );
    regional.insert(
        "Florida".to_string(),
        vec![hotline("FL Coalition Against Domestic Violence", "1-800-500-1119", "State-specific resources")],
    );

    EmergencyDirectory {
        national: vec![
            hotline("Emergency Services", "911", "Police, Fire, Medical"),
            hotline("National Domestic Violence Hotline", "1-800-799-7233", "24/7 confidential support"),
            hotline("Crisis Text Line", "Text HOME to 741741", "24/7 crisis support via text"),
            hotline("National Sexual Assault Hotline", "1-800-656-4673", "RAINN 24/7 support"),
            hotline("National Suicide Prevention Lifeline", "988", "24/7 mental health crisis support"),
        ],
        regional,
    }
}

fn guide(title: &str, steps: &[&str]) -> SafetyGuide {
    SafetyGuide {
        title: title.to_string(),
        steps: steps.iter().map(|step| step.to_string()).collect(),
    }
}

fn guides() -> Vec<SafetyGuide> {
    vec![
        guide(
            "Recognize Danger Signs",
            &[
                "Partner becomes increasingly controlling or possessive",
                "Isolation from friends and family increases",
                "Verbal threats or intimidation escalate",
                "Physical aggression or violence occurs",
                "Access to resources (money, phone, transportation) is restricted",
            ],
        ),
        guide(
            "Immediate Safety Actions",
            &[
                "Trust your instincts - if something feels wrong, it probably is",
                "Keep your phone charged and accessible at all times",
                "Memorize important phone numbers",
                "Identify safe locations and escape routes",
                "Have a code word with trusted friends/family for emergencies",
            ],
        ),
        guide(
            "If Being Followed",
            &[
                "Do NOT go home - go to a public, well-lit area",
                "Drive to a police station, fire station, or hospital",
                "Call 911 immediately",
                "Vary your route and make unexpected turns",
                "If on foot, go into a store or public building",
            ],
        ),
        guide(
            "Emergency Preparation",
            &[
                "Keep emergency cash hidden in a safe place",
                "Have copies of important documents ready",
                "Pack a small emergency bag if possible",
                "Establish a safety plan with trusted contacts",
                "Know the locations of local shelters and safe houses",
            ],
        ),
    ]
}
