//! Built-in event pools.
//!
//! Two fixed template sets: benign operational noise and the staged attack
//! chain (phishing foothold, lateral movement, exfiltration, ransomware).
//! The sequence generator draws from owned copies of these, so the statics
//! are never consumed.

use std::sync::LazyLock;

use crate::engine::event::{EventCategory, SecurityEvent, Severity};

static BUILTIN: LazyLock<EventPool> =
    LazyLock::new(|| EventPool::new(benign_templates(), attack_templates()));

/// A pair of event template sets the generator interleaves.
#[derive(Debug, Clone)]
pub struct EventPool {
    /// Benign background events.
    pub benign: Vec<SecurityEvent>,
    /// Staged attack indicators.
    pub suspicious: Vec<SecurityEvent>,
}

impl EventPool {
    /// Build a pool from explicit template sets.
    #[must_use]
    pub const fn new(benign: Vec<SecurityEvent>, suspicious: Vec<SecurityEvent>) -> Self {
        Self {
            benign,
            suspicious,
        }
    }

    /// The built-in scenario pool (10 benign + 8 attack events).
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Total number of templates across both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.benign.len() + self.suspicious.len()
    }

    /// True when both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.benign.is_empty() && self.suspicious.is_empty()
    }
}

fn benign_templates() -> Vec<SecurityEvent> {
    use EventCategory::Normal;
    use Severity::Info;

    vec![
        SecurityEvent::template(
            "norm_001",
            Normal,
            Info,
            "User alice.smith logged into workstation WS-MARKETING-01",
            "Active Directory",
        ),
        SecurityEvent::template(
            "norm_002",
            Normal,
            Info,
            "Scheduled backup completed successfully on SERVER-FILE-01",
            "Backup System",
        ),
        SecurityEvent::template(
            "norm_003",
            Normal,
            Info,
            "User bob.jones accessed shared folder /marketing/campaigns",
            "File Server",
        ),
        SecurityEvent::template(
            "norm_004",
            Normal,
            Info,
            "Print job completed on PRINTER-02",
            "Print Server",
        ),
        SecurityEvent::template(
            "norm_005",
            Normal,
            Info,
            "Routine system update installed on WS-HR-03",
            "WSUS",
        ),
        SecurityEvent::template(
            "norm_006",
            Normal,
            Info,
            "User charlie.brown logged out from WS-SALES-02",
            "Active Directory",
        ),
        SecurityEvent::template(
            "norm_007",
            Normal,
            Info,
            "Daily antivirus scan completed on WS-RECEPTION-01",
            "Antivirus",
        ),
        SecurityEvent::template(
            "norm_008",
            Normal,
            Info,
            "Scheduled database maintenance started",
            "SQL Server",
        ),
        SecurityEvent::template(
            "norm_009",
            Normal,
            Info,
            "Email sync completed for user@company.com",
            "Exchange Server",
        ),
        SecurityEvent::template(
            "norm_010",
            Normal,
            Info,
            "Firewall rule updated: Allow port 443",
            "Network Security",
        ),
    ]
}

fn attack_templates() -> Vec<SecurityEvent> {
    use EventCategory::Attack;
    use Severity::{Critical, Warning};

    vec![
        SecurityEvent::template(
            "susp_001",
            Attack,
            Warning,
            "Suspicious email attachment opened on WS-MARKETING-01",
            "Email Gateway",
        ),
        SecurityEvent::template(
            "susp_002",
            Attack,
            Warning,
            "Outbound connection to suspicious domain: secure-bank-login.com",
            "Firewall",
        ),
        SecurityEvent::template(
            "susp_003",
            Attack,
            Critical,
            "Unusual PowerShell execution detected on WS-MARKETING-01",
            "EDR System",
        ),
        SecurityEvent::template(
            "susp_004",
            Attack,
            Warning,
            "Multiple failed login attempts for admin account",
            "Domain Controller",
        ),
        SecurityEvent::template(
            "susp_005",
            Attack,
            Critical,
            "Lateral movement detected: WS-MARKETING-01 -> SERVER-FILE-01",
            "Network Monitor",
        ),
        SecurityEvent::template(
            "susp_006",
            Attack,
            Critical,
            "Large data transfer detected: SERVER-FILE-01 -> external IP",
            "DLP System",
        ),
        SecurityEvent::template(
            "susp_007",
            Attack,
            Critical,
            "Encrypted files detected on multiple workstations",
            "File System Monitor",
        ),
        SecurityEvent::template(
            "susp_008",
            Attack,
            Critical,
            "Ransom note file created: README_DECRYPT.txt",
            "File System Monitor",
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================
