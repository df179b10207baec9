use tabled::{settings::Style, Table, Tabled};
use crate::content::SiteInfo;
use super::output::db_marker;

#[derive(Tabled)]
pub struct SiteRow {
    #[tabled(rename = "Site")]
    pub name: String,
    #[tabled(rename = "Database")]
    pub database: String,
}

impl From<&SiteInfo> for SiteRow {
    fn from(site: &SiteInfo) -> Self {
        Self {
            name: site.name.clone(),
            database: db_marker(site.has_db),
        }
    }
}

/// Rounded table of sites, empty string when there are none
pub fn site_table(sites: &[SiteInfo]) -> String {
    if sites.is_empty() {
        return String::new();
    }

    let rows: Vec<SiteRow> = sites.iter().map(SiteRow::from).collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}
