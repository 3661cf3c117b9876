// caredash-widgets/src/data.rs
//! Static sample data backing the built-in widgets.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSample {
    pub total: u64,
    pub active: u64,
    /// Total one month ago
    pub last_month: u64,
    /// Total one quarter ago
    pub last_quarter: u64,
}

pub const HOSPITALS: MetricSample = MetricSample {
    total: 148,
    active: 139,
    last_month: 145,
    last_quarter: 131,
};

pub const CLINICS: MetricSample = MetricSample {
    total: 1_284,
    active: 1_197,
    last_month: 1_262,
    last_quarter: 1_301,
};

pub const PROVIDERS: MetricSample = MetricSample {
    total: 23_910,
    active: 21_457,
    last_month: 23_544,
    last_quarter: 22_870,
};

pub const DEVICES: MetricSample = MetricSample {
    total: 8_642,
    active: 7_915,
    last_month: 8_733,
    last_quarter: 8_120,
};

/// Patient visits per day, Monday first
pub const WEEKLY_VISITS: [(&str, u64); 7] = [
    ("Mon", 4_210),
    ("Tue", 4_785),
    ("Wed", 4_502),
    ("Thu", 4_960),
    ("Fri", 5_214),
    ("Sat", 2_731),
    ("Sun", 1_988),
];

/// Patient visits per week over the last quarter
pub const QUARTER_VISITS: [u64; 13] = [
    27_114, 28_305, 26_980, 29_442, 30_118, 29_870, 31_206, 30_554, 28_990, 31_870, 32_415,
    31_002, 28_390,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Maintenance,
    Offline,
}

impl DeviceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Maintenance => "Maintenance",
            Self::Offline => "Offline",
        }
    }
}

pub const DEVICE_STATUS: [(DeviceStatus, u64); 3] = [
    (DeviceStatus::Online, 7_915),
    (DeviceStatus::Maintenance, 412),
    (DeviceStatus::Offline, 315),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityEntry {
    pub minutes_ago: u32,
    pub actor: &'static str,
    pub action: &'static str,
    pub subject: &'static str,
}

pub const RECENT_ACTIVITY: [ActivityEntry; 8] = [
    ActivityEntry {
        minutes_ago: 2,
        actor: "M. Okafor",
        action: "registered device",
        subject: "Infusion pump IP-2231",
    },
    ActivityEntry {
        minutes_ago: 9,
        actor: "J. Lindqvist",
        action: "updated protocol",
        subject: "Sepsis screening v4",
    },
    ActivityEntry {
        minutes_ago: 27,
        actor: "A. Reyes",
        action: "onboarded provider",
        subject: "Dr. H. Tanaka",
    },
    ActivityEntry {
        minutes_ago: 54,
        actor: "System",
        action: "flagged device offline",
        subject: "Monitor VM-0917",
    },
    ActivityEntry {
        minutes_ago: 95,
        actor: "S. Patel",
        action: "closed ticket",
        subject: "#4471 Badge reader",
    },
    ActivityEntry {
        minutes_ago: 180,
        actor: "R. Moreau",
        action: "added clinic",
        subject: "Eastside Family Care",
    },
    ActivityEntry {
        minutes_ago: 410,
        actor: "K. Nguyen",
        action: "published survey",
        subject: "Discharge experience Q3",
    },
    ActivityEntry {
        minutes_ago: 1_620,
        actor: "System",
        action: "completed sync",
        subject: "Provider directory",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub number: u32,
    pub subject: &'static str,
    pub facility: &'static str,
    pub priority: Priority,
    pub age_hours: u32,
}

pub const OPEN_TICKETS: [Ticket; 6] = [
    Ticket {
        number: 4502,
        subject: "EHR login loop",
        facility: "St. Anne General",
        priority: Priority::High,
        age_hours: 5,
    },
    Ticket {
        number: 4498,
        subject: "Ventilator alarm config",
        facility: "Harbor Medical",
        priority: Priority::Urgent,
        age_hours: 2,
    },
    Ticket {
        number: 4489,
        subject: "Printer queue stuck",
        facility: "Eastside Family Care",
        priority: Priority::Low,
        age_hours: 49,
    },
    Ticket {
        number: 4485,
        subject: "Survey link broken",
        facility: "Northgate Clinic",
        priority: Priority::Normal,
        age_hours: 30,
    },
    Ticket {
        number: 4477,
        subject: "Pump firmware rollout",
        facility: "Valley Regional",
        priority: Priority::High,
        age_hours: 71,
    },
    Ticket {
        number: 4463,
        subject: "Provider import errors",
        facility: "Harbor Medical",
        priority: Priority::Normal,
        age_hours: 120,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Active,
    Review,
    Draft,
}

impl ProtocolState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Review => "In review",
            Self::Draft => "Draft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    pub name: &'static str,
    pub version: u32,
    pub state: ProtocolState,
    pub sites: u32,
}

pub const PROTOCOLS: [Protocol; 5] = [
    Protocol {
        name: "Sepsis screening",
        version: 4,
        state: ProtocolState::Active,
        sites: 131,
    },
    Protocol {
        name: "Stroke pathway",
        version: 2,
        state: ProtocolState::Active,
        sites: 96,
    },
    Protocol {
        name: "Fall prevention",
        version: 3,
        state: ProtocolState::Review,
        sites: 0,
    },
    Protocol {
        name: "Remote glucose monitoring",
        version: 1,
        state: ProtocolState::Draft,
        sites: 0,
    },
    Protocol {
        name: "Hand hygiene audit",
        version: 6,
        state: ProtocolState::Active,
        sites: 148,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Survey {
    pub title: &'static str,
    pub sent: u32,
    pub responses: u32,
    pub days_left: u32,
}

pub const SURVEYS: [Survey; 4] = [
    Survey {
        title: "Discharge experience Q3",
        sent: 12_400,
        responses: 4_870,
        days_left: 12,
    },
    Survey {
        title: "Provider onboarding",
        sent: 640,
        responses: 512,
        days_left: 3,
    },
    Survey {
        title: "Device usability",
        sent: 2_100,
        responses: 388,
        days_left: 21,
    },
    Survey {
        title: "Telehealth follow-up",
        sent: 5_300,
        responses: 2_915,
        days_left: 0,
    },
];
