//! Startup banner.

use crate::consts::{AUTHOR, HOMEPAGE, REPO, VERSION};

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub address: &'a str,
    pub guestbook: &'a str,
    pub identity: &'a str,
    pub database: &'a str,
}

/// Build the startup banner text.
pub fn banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          G U E S T B O O K            ║
   ║      sign here, read the others       ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   listen    http://{}
   guestbook {}
   identity  {}
   database  {}
"#,
        VERSION,
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.address,
        info.guestbook,
        info.identity,
        info.database,
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner(info));
}
