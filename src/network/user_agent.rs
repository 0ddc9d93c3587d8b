//! User agent generation

use rand::seq::SliceRandom;

/// Generate a realistic desktop browser user agent
///
/// LinkedIn rejects requests that do not look like they come from a browser,
/// so one of a few recent Chrome/Firefox strings is picked at client creation.
pub fn generate_user_agent() -> String {
    let mut rng = rand::thread_rng();

    let platforms = [
        "Windows NT 10.0; Win64; x64",
        "Macintosh; Intel Mac OS X 10_15_7",
        "X11; Linux x86_64",
    ];
    let chrome_versions = ["122.0.0.0", "123.0.0.0", "124.0.0.0", "125.0.0.0"];
    let firefox_versions = ["124.0", "125.0", "126.0"];

    let platform = platforms.choose(&mut rng).copied().unwrap_or(platforms[0]);

    if rand::random::<bool>() {
        let chrome = chrome_versions
            .choose(&mut rng)
            .copied()
            .unwrap_or(chrome_versions[0]);
        format!(
            "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
            platform, chrome
        )
    } else {
        let firefox = firefox_versions
            .choose(&mut rng)
            .copied()
            .unwrap_or(firefox_versions[0]);
        format!(
            "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
            platform, firefox, firefox
        )
    }
}
