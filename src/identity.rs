//! Per-request browser identity randomization.
//!
//! Every outbound request is made to look like a fresh, plausible
//! browser session: a TLS profile is drawn at random from a fixed
//! catalog, a user-agent matching that profile's browser family and
//! platform is sampled from a static corpus, and the standard header
//! set GMGN's front-end sends is assembled around it. The TLS
//! handshake of the resulting client is shaped by the chosen profile,
//! so the negotiation fingerprint and the declared user-agent stay
//! mutually consistent.

use std::time::Duration;

use rand::seq::SliceRandom;
use rquest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, HOST, REFERER, USER_AGENT,
};
use rquest::{Client, Impersonate};

use crate::Result;

/// Host presented to the remote service.
const API_HOST: &str = "gmgn.ai";

/// Referer pointing at the service's own front-end for this chain.
const REFERER_URL: &str = "https://gmgn.ai/?chain=tron";

/// Browser family a catalog profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFamily {
    Chrome,
    Safari,
    Firefox,
    Opera,
}

/// Browser family used for user-agent generation.
///
/// Opera is absent on purpose: it shares Chromium's agent-string space,
/// so opera profiles collapse into [`UaFamily::Chrome`] here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UaFamily {
    Chrome,
    Firefox,
    Safari,
}

/// Platform attributed to the synthetic user agent.
///
/// Deliberately a coarse two-way split; profiles without an iOS marker
/// are presented as Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Ios,
}

/// One entry of the TLS profile catalog.
pub struct TlsProfile {
    /// Catalog token, e.g. `chrome_120` or `safari_ios_17_2`.
    pub token: &'static str,
    pub family: ProfileFamily,
    /// Whether the token carries an iOS platform marker.
    pub ios: bool,
    /// Handshake preset applied to clients built from this profile.
    impersonate: Impersonate,
}

/// Fixed allow-list of TLS profiles, restricted to the chrome, safari,
/// firefox, and opera families.
///
/// The impersonation layer ships no opera presets; opera entries carry
/// the Chromium preset of the matching engine generation while the
/// token and family remain opera-flavored.
static PROFILES: &[TlsProfile] = &[
    TlsProfile {
        token: "chrome_116",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome116,
    },
    TlsProfile {
        token: "chrome_117",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome117,
    },
    TlsProfile {
        token: "chrome_118",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome118,
    },
    TlsProfile {
        token: "chrome_119",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome119,
    },
    TlsProfile {
        token: "chrome_120",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome120,
    },
    TlsProfile {
        token: "chrome_127",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome127,
    },
    TlsProfile {
        token: "chrome_128",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome128,
    },
    TlsProfile {
        token: "chrome_131",
        family: ProfileFamily::Chrome,
        ios: false,
        impersonate: Impersonate::Chrome131,
    },
    TlsProfile {
        token: "safari_15_6_1",
        family: ProfileFamily::Safari,
        ios: false,
        impersonate: Impersonate::Safari15_6_1,
    },
    TlsProfile {
        token: "safari_16_0",
        family: ProfileFamily::Safari,
        ios: false,
        impersonate: Impersonate::Safari16,
    },
    TlsProfile {
        token: "safari_17_5",
        family: ProfileFamily::Safari,
        ios: false,
        impersonate: Impersonate::Safari17_5,
    },
    TlsProfile {
        token: "safari_18_0",
        family: ProfileFamily::Safari,
        ios: false,
        impersonate: Impersonate::Safari18,
    },
    TlsProfile {
        token: "safari_ios_16_5",
        family: ProfileFamily::Safari,
        ios: true,
        impersonate: Impersonate::SafariIos16_5,
    },
    TlsProfile {
        token: "safari_ios_17_2",
        family: ProfileFamily::Safari,
        ios: true,
        impersonate: Impersonate::SafariIos17_2,
    },
    TlsProfile {
        token: "firefox_109",
        family: ProfileFamily::Firefox,
        ios: false,
        impersonate: Impersonate::Firefox109,
    },
    TlsProfile {
        token: "firefox_117",
        family: ProfileFamily::Firefox,
        ios: false,
        impersonate: Impersonate::Firefox117,
    },
    TlsProfile {
        token: "firefox_133",
        family: ProfileFamily::Firefox,
        ios: false,
        impersonate: Impersonate::Firefox133,
    },
    TlsProfile {
        token: "opera_89",
        family: ProfileFamily::Opera,
        ios: false,
        impersonate: Impersonate::Chrome104,
    },
    TlsProfile {
        token: "opera_90",
        family: ProfileFamily::Opera,
        ios: false,
        impersonate: Impersonate::Chrome105,
    },
    TlsProfile {
        token: "opera_91",
        family: ProfileFamily::Opera,
        ios: false,
        impersonate: Impersonate::Chrome106,
    },
];

static CHROME_WINDOWS_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

static CHROME_IOS_AGENTS: &[&str] = &[
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/119.0.6045.169 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/120.0.6099.119 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/131.0.6778.73 Mobile/15E148 Safari/604.1",
];

static FIREFOX_WINDOWS_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

static FIREFOX_IOS_AGENTS: &[&str] = &[
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) FxiOS/119.0 Mobile/15E148 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) FxiOS/121.0 Mobile/15E148 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) FxiOS/133.0 Mobile/15E148 Safari/605.1.15",
];

/// Desktop Safari corpus backing the (safari, windows) cell of the
/// platform split.
static SAFARI_DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Safari/605.1.15",
];

static SAFARI_IOS_AGENTS: &[&str] = &[
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 18_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Mobile/15E148 Safari/604.1",
];

/// A fully assembled per-request browser identity.
///
/// Minted fresh for every outbound request and never reused; all
/// fields are fixed at construction.
pub struct ClientIdentity {
    pub profile: &'static TlsProfile,
    pub ua_family: UaFamily,
    pub platform: Platform,
    pub user_agent: &'static str,
    pub headers: HeaderMap,
}

impl ClientIdentity {
    /// Builds an HTTP client whose TLS handshake fingerprint matches
    /// this identity's profile.
    ///
    /// # Errors
    ///
    /// Returns [`TronwatchError::Transport`](crate::TronwatchError::Transport)
    /// if the client cannot be constructed.
    pub fn build_client(&self, timeout: Duration) -> Result<Client> {
        let client = Client::builder()
            .impersonate(self.profile.impersonate.clone())
            .timeout(timeout)
            .build()?;
        Ok(client)
    }
}

/// Maps a catalog profile to the (family, platform) pair its synthetic
/// user-agent is generated for.
///
/// Opera profiles remap to chrome (the TLS profile itself stays
/// opera-flavored); an iOS marker selects [`Platform::Ios`], everything
/// else is presented as Windows. No other platform value exists.
pub fn ua_target(profile: &TlsProfile) -> (UaFamily, Platform) {
    let family = match profile.family {
        ProfileFamily::Chrome | ProfileFamily::Opera => UaFamily::Chrome,
        ProfileFamily::Safari => UaFamily::Safari,
        ProfileFamily::Firefox => UaFamily::Firefox,
    };
    let platform = if profile.ios {
        Platform::Ios
    } else {
        Platform::Windows
    };
    (family, platform)
}

/// Static user-agent corpus for one (family, platform) cell.
fn agent_corpus(family: UaFamily, platform: Platform) -> &'static [&'static str] {
    match (family, platform) {
        (UaFamily::Chrome, Platform::Windows) => CHROME_WINDOWS_AGENTS,
        (UaFamily::Chrome, Platform::Ios) => CHROME_IOS_AGENTS,
        (UaFamily::Firefox, Platform::Windows) => FIREFOX_WINDOWS_AGENTS,
        (UaFamily::Firefox, Platform::Ios) => FIREFOX_IOS_AGENTS,
        (UaFamily::Safari, Platform::Windows) => SAFARI_DESKTOP_AGENTS,
        (UaFamily::Safari, Platform::Ios) => SAFARI_IOS_AGENTS,
    }
}

/// Mints a fresh randomized identity.
///
/// Draws a TLS profile uniformly from the catalog, samples a matching
/// user-agent, and assembles the browser header set around it. Reads
/// only immutable statics, so concurrent callers are fine.
pub fn next_identity() -> ClientIdentity {
    let mut rng = rand::thread_rng();
    let profile = PROFILES
        .choose(&mut rng)
        .expect("profile catalog is non-empty");
    let (ua_family, platform) = ua_target(profile);
    let user_agent = *agent_corpus(ua_family, platform)
        .choose(&mut rng)
        .expect("agent corpus is non-empty");

    ClientIdentity {
        profile,
        ua_family,
        platform,
        user_agent,
        headers: browser_headers(user_agent),
    }
}

/// Assembles the fixed header set GMGN's front-end sends, around the
/// sampled user-agent.
fn browser_headers(user_agent: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HOST, HeaderValue::from_static(API_HOST));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("priority"),
        HeaderValue::from_static("u=1, i"),
    );
    headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    headers
}
