//! Ordered description-matching tables, one per bank.
//!
//! Order is significant: rules are tried top to bottom, patterns within a
//! rule left to right, and the first capture wins. Specific patterns must
//! precede general catch-alls (the salary rule sits above the generic bank
//! credit, the ATM rules above the fee/interest catch-alls).
//!
//! Every pattern carries exactly one capture group: the counter-party text.

pub const TRANSFER_FROM: &str = "TRANSFER_FROM";
pub const TRANSFER_TO: &str = "TRANSFER_TO";
pub const PAYMENT_TO: &str = "PAYMENT_TO";
pub const CARD_PAYMENT: &str = "CARD_PAYMENT";
pub const SALARY: &str = "SALARY";
pub const ATM: &str = "ATM";
pub const FEE: &str = "FEE";
pub const INTEREST: &str = "INTEREST";

/// A type label and the patterns that classify a description under it.
pub type Rule = (&'static str, &'static [&'static str]);

pub const ANZ_RULES: &[Rule] = &[
    (
        CARD_PAYMENT,
        &[
            r"VISA\sDEBIT\sPURCHASE\sCARD\s\d+\s(.+)\s\w+",
            r"EFTPOS\s(.+\w)\s+\w+\s.+",
            r"REV\s(VISA)\sDEBIT\sPURCHASE",
        ],
    ),
    (
        TRANSFER_TO,
        &[
            r".*PAYMENT\sTRANSFER\s\d+\sTO\s(.+)",
            r"ANZ\sINTERNET\sBANKING\sFUNDS\sTFER\sTRANSFER\s\d+.+TO\s+(.+)",
        ],
    ),
    (
        TRANSFER_FROM,
        &[
            r"TRANSFER\sFROM\s(\w+(?:\s\w+)*)",
            r"ANZ\s(?:INTERNET\s|M-)BANKING\sFUNDS\sTFER\s+(?:.*FROM\s+)?(.+)",
            r"PAYMENT\sFROM\s([\s\w]+)",
        ],
    ),
    (
        PAYMENT_TO,
        &[r".*BANKING\sBPAY\s(\w+).*", r"PAYMENT\sTO\s(.+)\s.*"],
    ),
    (
        SALARY,
        &[r"PAY.SALARY\sFROM\s((?:\w+\s)?(?:\w+\s)?(?:\w+)?).*"],
    ),
    (ATM, &[r".*(ATM\s).*", r"(CARD\sENTRY)\sAT\s.*"]),
    (FEE, &[r".*ACCOUNT SERVICING (FEE).*"]),
    (INTEREST, &[r".*(INTEREST).*"]),
];

pub const NATWEST_RULES: &[Rule] = &[
    (
        SALARY,
        &[r"BAC\s+(.+)\s+SALARY.*", r"BAC\s+SALARY\s+(.+)"],
    ),
    (
        CARD_PAYMENT,
        &[r"POS\s+\d*\s*(.+)", r"DPC\s+(.+)"],
    ),
    (ATM, &[r"CPT\s+.*(ATM).*", r"C/L\s+(.+)"]),
    (TRANSFER_TO, &[r"TFR\s+TO\s+(.+)", r"STO\s+(.+)"]),
    (TRANSFER_FROM, &[r"TFR\s+FROM\s+(.+)", r"BAC\s+(.+)"]),
    (
        PAYMENT_TO,
        &[r"D/D\s+(.+)", r"OLB\s+(?:PAYMENT\s+)?TO\s+(.+)"],
    ),
    (FEE, &[r"CHG\s+(.+)", r".*ACCOUNT\s(FEE).*"]),
    (INTEREST, &[r"INT\s+(.+)", r".*(INTEREST).*"]),
];

/// Tokens dropped from captured counter-party text. Matched against whole
/// tokens only: dates and numbers, weekday abbreviations, currency and
/// country codes, reference and masked-card codes, card-scheme boilerplate,
/// and the cities that card processors append to merchant names.
pub const NOISE: &[&str] = &[
    r"\d+",
    r"\d{2}[/.-]\d{2}(?:[/.-]\d{2,4})?",
    r"\d{2}[A-Z]{3}\d{2}",
    r"(?:MON|TUE|TUES|WED|THU|THUR|FRI|SAT|SUN)",
    r"(?:AUD|NZD|GBP|USD|EUR)",
    r"(?:REF|REFERENCE)\S*",
    r"[Xx]{2,}\d*",
    r"(?:CARD|VISA|EFTPOS|BPAY|POS|AU|GB)",
    r"(?:SYDNEY|MELBOURNE|BRISBANE|PERTH|ADELAIDE|AUCKLAND|LONDON|MANCHESTER|BRISTOL|EDINBURGH)",
];
