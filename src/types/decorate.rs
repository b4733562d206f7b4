//! Oracle type clause rendering.

/// Byte or character length semantics for `CHAR`/`VARCHAR2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthSemantics {
    Byte,
    Char,
}

impl LengthSemantics {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Byte => "BYTE",
            Self::Char => "CHAR",
        }
    }
}

/// Numeric and temporal qualifiers attached to a column type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeQualifiers {
    pub length: Option<u32>,
    pub length_semantics: Option<LengthSemantics>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub fract_sec_precision: Option<u32>,
    pub with_time_zone: bool,
    pub local_time_zone: bool,
    pub year_precision: Option<u32>,
    pub day_precision: Option<u32>,
}

fn can_have_byte(t: &str) -> bool {
    matches!(t, "CHAR" | "VARCHAR2")
}

fn can_have_length(t: &str) -> bool {
    matches!(t, "CHAR" | "VARCHAR2" | "NCHAR" | "NVARCHAR2" | "RAW" | "UROWID")
}

fn can_have_precision(t: &str) -> bool {
    matches!(t, "NUMBER" | "FLOAT")
}

fn can_have_scale(t: &str) -> bool {
    t == "NUMBER"
}

fn precision_suffix(p: Option<u32>) -> String {
    p.map(|p| format!("({p})")).unwrap_or_default()
}

/// Render the full type clause for `oracle_type`, e.g. `VARCHAR2(50 CHAR)`
/// or `INTERVAL DAY(2) TO SECOND(6)`. The first matching rule wins.
pub fn decorate(oracle_type: &str, q: &TypeQualifiers) -> String {
    let t = oracle_type.trim();

    if let (true, Some(length), Some(semantics)) = (can_have_byte(t), q.length, q.length_semantics) {
        return format!("{t}({length} {})", semantics.keyword());
    }
    if let (true, Some(length)) = (can_have_length(t), q.length) {
        return format!("{t}({length})");
    }
    if can_have_scale(t) && (q.precision.is_some() || q.scale.is_some()) {
        // Oracle spells "scale without precision" as `*`.
        let precision = q
            .precision
            .filter(|p| *p > 0)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "*".to_string());
        return match q.scale {
            Some(scale) => format!("{t}({precision},{scale})"),
            None => format!("{t}({precision})"),
        };
    }
    if let (true, Some(precision)) = (can_have_precision(t), q.precision) {
        return format!("{t}({precision})");
    }
    match t {
        "TIMESTAMP" => {
            let zone = if q.local_time_zone {
                " WITH LOCAL TIME ZONE"
            } else if q.with_time_zone {
                " WITH TIME ZONE"
            } else {
                ""
            };
            format!("TIMESTAMP{}{zone}", precision_suffix(q.fract_sec_precision))
        }
        "INTERVAL YEAR" => format!("INTERVAL YEAR{} TO MONTH", precision_suffix(q.year_precision)),
        "INTERVAL DAY" => format!(
            "INTERVAL DAY{} TO SECOND{}",
            precision_suffix(q.day_precision),
            precision_suffix(q.fract_sec_precision)
        ),
        _ => t.to_string(),
    }
}

/// Leading major version of a release string such as `21c`, `19c` or `12cR2`.
pub fn major_version(version: &str) -> Option<u32> {
    let digits: String = version
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Native JSON columns exist from 21c on; older targets store JSON in a CLOB.
pub fn replace_type_by_version<'a>(oracle_type: &'a str, db_version: Option<&str>) -> &'a str {
    let supports_json = db_version.and_then(major_version).is_some_and(|v| v >= 21);
    if oracle_type == "JSON" && !supports_json {
        "CLOB"
    } else {
        oracle_type
    }
}
