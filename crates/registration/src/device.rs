//! Device fingerprint from a user-agent string.
//!
//! Browser and OS tokens are tested in a fixed priority order with plain
//! substring checks, so a Chromium UA carrying a `Safari/` compatibility
//! token reports as Chrome, and an Android UA (which also says `Linux`)
//! reports Linux.

use once_cell::sync::Lazy;
use regex::Regex;

use customerhub_core::{DeviceInfo, DeviceType, OperatingSystem};

const UNKNOWN: &str = "Unknown";

/// Tested in this order; first hit wins.
const BROWSER_TOKENS: [&str; 5] = ["Firefox", "Chrome", "Safari", "Edge", "Opera"];

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Firefox|Chrome|Safari|Edge|Opera)/([0-9.]+)").unwrap());

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Mobi|Android|iPhone").unwrap());

static TABLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Tablet|iPad").unwrap());

// iPhone/iPad UAs say "like Mac OS X" and never "iOS".
static APPLE_MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"iPhone|iPad|iPod").unwrap());

const OS_TOKENS: [(&str, OperatingSystem); 5] = [
    ("Windows", OperatingSystem::Windows),
    ("Mac", OperatingSystem::MacOs),
    ("Linux", OperatingSystem::Linux),
    ("Android", OperatingSystem::Android),
    ("iOS", OperatingSystem::Ios),
];

pub fn extract(user_agent: &str) -> DeviceInfo {
    DeviceInfo {
        browser_name: browser_name(user_agent).to_string(),
        browser_version: browser_version(user_agent).to_string(),
        device_type: device_type(user_agent),
        os: operating_system(user_agent),
        raw_user_agent: user_agent.to_string(),
    }
}

fn browser_name(ua: &str) -> &'static str {
    BROWSER_TOKENS
        .iter()
        .copied()
        .find(|token| ua.contains(token))
        .unwrap_or(UNKNOWN)
}

/// Version of the first browser token in the string, whichever it is
fn browser_version(ua: &str) -> &str {
    VERSION_RE
        .captures(ua)
        .and_then(|cap| cap.get(2))
        .map(|m| m.as_str())
        .unwrap_or(UNKNOWN)
}

fn device_type(ua: &str) -> DeviceType {
    if MOBILE_RE.is_match(ua) {
        DeviceType::Mobile
    } else if TABLET_RE.is_match(ua) {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}

fn operating_system(ua: &str) -> OperatingSystem {
    if APPLE_MOBILE_RE.is_match(ua) {
        return OperatingSystem::Ios;
    }
    OS_TOKENS
        .iter()
        .find(|(token, _)| ua.contains(token))
        .map(|(_, os)| *os)
        .unwrap_or(OperatingSystem::Unknown)
}
