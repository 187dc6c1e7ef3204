use crate::error::{ProtocolError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

static BILL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<congress>[1-9][0-9]*)(?P<stage>[a-z]{1,8})(?P<number>[1-9][0-9]*)(?P<version>[a-z]+)?$",
    )
    .expect("bill number pattern")
});

// e.g. congress/data/117/bills/sconres/sconres2/text-versions/is
static CONGRESS_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|/)(?P<congress>[1-9][0-9]*)/(?P<doctype>bills|amendments)/(?P<stage>[a-z]{1,8})/(?P<billnumber>[a-z]{1,8}[1-9][0-9]*)(?:/text-versions/(?P<version>[a-z]+))?(?:/|$)",
    )
    .expect("congress path pattern")
});

// e.g. BILLS-116hr222ih-uslm.xml
static BILLS_FILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"BILLS-(?P<congress>[1-9][0-9]*)(?P<stage>[a-z]{1,8})(?P<number>[1-9][0-9]*)(?P<version>[a-z]+)")
        .expect("bills file pattern")
});

/// Parsed form of a concatenated bill identifier such as `116hr1500rh`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BillNumber {
    pub congress: u32,
    /// Chamber/type prefix: `hr`, `s`, `hres`, `sconres`, ...
    pub stage: String,
    pub number: u32,
    /// Text version suffix (`ih`, `rh`, `enr`, ...)
    pub version: Option<String>,
}

impl BillNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = BILL_NUMBER_RE
            .captures(raw.trim())
            .ok_or_else(|| ProtocolError::PathFormat(raw.to_string()))?;

        let congress = caps["congress"]
            .parse()
            .map_err(|_| ProtocolError::PathFormat(raw.to_string()))?;
        let number = caps["number"]
            .parse()
            .map_err(|_| ProtocolError::PathFormat(raw.to_string()))?;

        Ok(Self {
            congress,
            stage: caps["stage"].to_string(),
            number,
            version: caps.name("version").map(|m| m.as_str().to_string()),
        })
    }

    /// `116hr1500rh` -> `116hr1500`
    #[must_use]
    pub fn without_version(&self) -> String {
        format!("{}{}{}", self.congress, self.stage, self.number)
    }

    /// Dash form used by upstream cross references: `hr1500-116`.
    #[must_use]
    pub fn bill_id(&self) -> String {
        format!("{}{}-{}", self.stage, self.number, self.congress)
    }

    #[must_use]
    pub fn doctype(&self) -> &'static str {
        if self.stage.ends_with("amdt") {
            "amendments"
        } else {
            "bills"
        }
    }

    /// `116/bills/hr/hr1500`
    #[must_use]
    pub fn bill_dir(&self) -> PathBuf {
        PathBuf::from(self.congress.to_string())
            .join(self.doctype())
            .join(&self.stage)
            .join(format!("{}{}", self.stage, self.number))
    }

    /// `116/bills/hr/hr1500/text-versions/rh`
    pub fn text_version_dir(&self) -> Result<PathBuf> {
        let version = self
            .version
            .as_deref()
            .ok_or_else(|| ProtocolError::MissingVersion {
                bill: self.to_string(),
            })?;
        Ok(self.bill_dir().join("text-versions").join(version))
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.congress, self.stage, self.number)?;
        if let Some(version) = &self.version {
            f.write_str(version)?;
        }
        Ok(())
    }
}

impl FromStr for BillNumber {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Converts a bill id of the form `hr299-116` into `116hr299`.
pub fn bill_id_to_bill_number(bill_id: &str) -> Result<String> {
    let invalid = || ProtocolError::InvalidBillId(bill_id.to_string());

    let (type_number, congress) = bill_id.trim().split_once('-').ok_or_else(invalid)?;
    if type_number.is_empty() || congress.is_empty() || congress.contains('-') {
        return Err(invalid());
    }

    let candidate = format!("{congress}{type_number}");
    let parsed = BillNumber::parse(&candidate).map_err(|_| invalid())?;
    if parsed.version.is_some() {
        return Err(invalid());
    }
    Ok(candidate)
}

/// Converts a bill number of the form `116hr299` into `hr299-116`.
pub fn bill_number_to_bill_id(bill_number: &str) -> Result<String> {
    let parsed = BillNumber::parse(bill_number)?;
    log::trace!("bill number {bill_number} parsed as {parsed:?}");
    Ok(parsed.bill_id())
}

/// Derives `{congress}{type}{number}{version?}` from a path in the congress data tree
/// (`.../116/bills/hr/hr1500/text-versions/rh/document.xml`) or from a `BILLS-...xml` file
/// name. Returns `None` when the path carries no recognizable identifier.
#[must_use]
pub fn bill_number_from_path(path: &Path) -> Option<String> {
    let normalized = path.to_string_lossy().replace('\\', "/");

    if let Some(caps) = CONGRESS_PATH_RE.captures(&normalized) {
        let mut out = format!("{}{}", &caps["congress"], &caps["billnumber"]);
        if let Some(version) = caps.name("version") {
            out.push_str(version.as_str());
        }
        return Some(out);
    }

    BILLS_FILE_RE.captures(&normalized).map(|caps| {
        format!(
            "{}{}{}{}",
            &caps["congress"], &caps["stage"], &caps["number"], &caps["version"]
        )
    })
}

/// Relative location of a bill version's text inside the congress data tree.
pub fn relative_path_from_bill_number(bill_number: &str) -> Result<PathBuf> {
    BillNumber::parse(bill_number)?.text_version_dir()
}
