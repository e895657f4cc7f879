//! Built-in question bank.
//!
//! Twelve questions across four categories, three per category. Category
//! order here defines the order of per-category breakdowns in grade
//! reports.

use super::{QuizOption, QuizQuestion};

pub(super) static QUESTION_BANK: &[QuizQuestion] = &[
    // ── phishing ─────────────────────────────────────────────────────
    QuizQuestion {
        id: "q1",
        category: "phishing",
        question: "Which of the following is the strongest indicator that an \
                   email is a phishing attempt?",
        options: &[
            QuizOption {
                id: "a",
                text: "The sender's display name matches a known colleague",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "The message urges immediate action and links to a \
                       look-alike domain",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "The email was received outside business hours",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "The message contains the company logo",
                is_correct: false,
            },
        ],
        explanation: "Urgency combined with a look-alike domain is the classic \
                      phishing pattern; cosmetic details such as logos and \
                      display names are trivial to forge.",
    },
    QuizQuestion {
        id: "q2",
        category: "phishing",
        question: "An employee reports they clicked a link in a suspicious \
                   email and entered their password. What should the SOC do \
                   first?",
        options: &[
            QuizOption {
                id: "a",
                text: "Delete the email from the employee's mailbox",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Reset the credentials and review recent logins for \
                       unfamiliar locations",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "Reply to the sender to verify the email is legitimate",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "Wait to see whether the account is actually misused",
                is_correct: false,
            },
        ],
        explanation: "An immediate credential reset plus an authentication \
                      review contains the compromise before the stolen \
                      password can be used.",
    },
    QuizQuestion {
        id: "q3",
        category: "phishing",
        question: "What distinguishes spear phishing from ordinary phishing?",
        options: &[
            QuizOption {
                id: "a",
                text: "It targets a specific person or organization with \
                       tailored content",
                is_correct: true,
            },
            QuizOption {
                id: "b",
                text: "It is sent to as many recipients as possible",
                is_correct: false,
            },
            QuizOption {
                id: "c",
                text: "It is delivered over SMS instead of email",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "It always impersonates a bank",
                is_correct: false,
            },
        ],
        explanation: "Spear phishing is targeted: the attacker researches the \
                      victim and crafts the lure specifically for them, unlike \
                      bulk campaigns.",
    },
    // ── malware ──────────────────────────────────────────────────────
    QuizQuestion {
        id: "q4",
        category: "malware",
        question: "EDR reports a PowerShell process attempting to disable the \
                   endpoint protection agent. How should this be triaged?",
        options: &[
            QuizOption {
                id: "a",
                text: "As routine administration, since PowerShell is a \
                       built-in tool",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "As a critical alert indicating likely hands-on \
                       intrusion activity",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "As a false positive unless the user complains",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "As a licensing problem with the EDR vendor",
                is_correct: false,
            },
        ],
        explanation: "Tampering with security tooling is a hallmark of an \
                      active compromise and warrants immediate escalation.",
    },
    QuizQuestion {
        id: "q5",
        category: "malware",
        question: "Which behavior most strongly suggests ransomware activity?",
        options: &[
            QuizOption {
                id: "a",
                text: "A single document fails to open",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Rapid modification of many files together with dropped \
                       ransom notes",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "High CPU usage during a scheduled antivirus scan",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "A user installing an unapproved browser extension",
                is_correct: false,
            },
        ],
        explanation: "Mass file modification accompanied by ransom notes is \
                      the signature of an encryption run in progress.",
    },
    QuizQuestion {
        id: "q6",
        category: "malware",
        question: "What is the main difference between a virus and a worm?",
        options: &[
            QuizOption {
                id: "a",
                text: "A virus needs a host file or user action to spread; a \
                       worm propagates on its own",
                is_correct: true,
            },
            QuizOption {
                id: "b",
                text: "A worm only affects servers",
                is_correct: false,
            },
            QuizOption {
                id: "c",
                text: "A virus cannot be detected by antivirus software",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "There is no difference",
                is_correct: false,
            },
        ],
        explanation: "Worms self-propagate across networks without user \
                      interaction, which is why they spread faster than \
                      file-infecting viruses.",
    },
    // ── incident_response ────────────────────────────────────────────
    QuizQuestion {
        id: "q7",
        category: "incident_response",
        question: "In the standard incident response lifecycle, which phase \
                   follows containment?",
        options: &[
            QuizOption {
                id: "a",
                text: "Preparation",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Eradication and recovery",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "Lessons learned",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "Detection",
                is_correct: false,
            },
        ],
        explanation: "After containing the threat, responders remove the \
                      attacker's foothold and restore systems before the \
                      post-incident review.",
    },
    QuizQuestion {
        id: "q8",
        category: "incident_response",
        question: "Why is an infected machine usually isolated from the \
                   network rather than powered off immediately?",
        options: &[
            QuizOption {
                id: "a",
                text: "Powering off takes longer than isolation",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Isolation stops lateral movement while preserving \
                       volatile evidence",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "Powering off voids the hardware warranty",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "Antivirus vendors require isolation",
                is_correct: false,
            },
        ],
        explanation: "Pulling power destroys memory-resident evidence; network \
                      isolation halts the spread while keeping the machine's \
                      state intact for investigation.",
    },
    QuizQuestion {
        id: "q9",
        category: "incident_response",
        question: "Who decides whether a security incident is disclosed \
                   publicly?",
        options: &[
            QuizOption {
                id: "a",
                text: "The analyst who discovered it",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Incident command together with legal and \
                       communications teams",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "The affected employee",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "Nobody; incidents are never disclosed",
                is_correct: false,
            },
        ],
        explanation: "Disclosure has legal and reputational consequences, so \
                      it follows the organization's escalation path rather \
                      than an individual analyst's judgement.",
    },
    // ── forensics ────────────────────────────────────────────────────
    QuizQuestion {
        id: "q10",
        category: "forensics",
        question: "What is the correct order of volatility when collecting \
                   evidence?",
        options: &[
            QuizOption {
                id: "a",
                text: "Disk images first, then memory",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Memory and network state first, then disk",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "Log files first, then memory",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "The order does not matter",
                is_correct: false,
            },
        ],
        explanation: "Volatile data such as RAM contents and active \
                      connections disappears on power loss, so it is captured \
                      before less volatile sources like disk.",
    },
    QuizQuestion {
        id: "q11",
        category: "forensics",
        question: "Why is a cryptographic hash taken of a disk image before \
                   analysis?",
        options: &[
            QuizOption {
                id: "a",
                text: "To compress the image for storage",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "To prove the evidence has not been altered",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "To encrypt the image against tampering",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "To speed up keyword searches",
                is_correct: false,
            },
        ],
        explanation: "Matching hashes before and after analysis demonstrate \
                      that the evidence is intact, which is essential for the \
                      chain of custody.",
    },
    QuizQuestion {
        id: "q12",
        category: "forensics",
        question: "Which artifact best establishes that a specific program \
                   ran on a Windows host?",
        options: &[
            QuizOption {
                id: "a",
                text: "The program's icon on the desktop",
                is_correct: false,
            },
            QuizOption {
                id: "b",
                text: "Prefetch entries and other execution artifacts",
                is_correct: true,
            },
            QuizOption {
                id: "c",
                text: "The size of the pagefile",
                is_correct: false,
            },
            QuizOption {
                id: "d",
                text: "The desktop wallpaper",
                is_correct: false,
            },
        ],
        explanation: "Execution artifacts such as Prefetch record that a \
                      binary actually ran, while cosmetic traces only show it \
                      was present on disk.",
    },
];
