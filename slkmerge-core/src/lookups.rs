//! Standard dTIMS input column names.
//!
//! Import the [CN] constant and refer to columns as `CN.slk_from` rather
//! than repeating string literals:
//!
//! ```rust
//! use slkmerge_core::lookups::CN;
//!
//! assert_eq!(CN.carriageway, "cway");
//! ```
use std::fmt::{self, Display};

///
/// Lookup table of standard column names. Pure data; the only instance is [CN].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardColumnNames {
    pub segment_name: &'static str,

    pub road_number: &'static str,
    pub carriageway: &'static str,

    pub slk_from: &'static str,
    pub slk_to: &'static str,
    pub slk_length: &'static str,

    pub xsp: &'static str,

    pub pavement_total_width: &'static str,
    pub pavement_year_constructed: &'static str,

    pub surface_width: &'static str,
    pub surface_width_oldest: &'static str,
    pub surface_year: &'static str,
    pub surface_type: &'static str,
    pub surface_aggregate_size: &'static str,
    pub surface_asphalt_type: &'static str,

    pub corpex_speed_limit: &'static str,
    pub corpex_rainfall: &'static str,
    pub corpex_average_temp: &'static str,
    pub corpex_minimum_temp: &'static str,
    pub corpex_link_category: &'static str,
    pub corpex_aadt_year: &'static str,
    pub corpex_aadt: &'static str,

    pub curvature: &'static str,
    pub deflection: &'static str,
}

pub const CN: StandardColumnNames = StandardColumnNames {
    segment_name: "seg_name",

    road_number: "road_no",
    carriageway: "cway",

    slk_from: "slk_from",
    slk_to: "slk_to",
    slk_length: "slk_length",

    xsp: "xsp",

    pavement_total_width: "F_Wdth",
    pavement_year_constructed: "PaveYr",

    surface_width: "SurfWidth",
    surface_width_oldest: "SurfWidthOldest",
    surface_year: "SurfYr",
    surface_type: "SurfType",
    surface_aggregate_size: "Agg_Siz",
    surface_asphalt_type: "ASTP",

    corpex_speed_limit: "Spd_Lmt",
    corpex_rainfall: "Rain",
    corpex_average_temp: "TAve",
    corpex_minimum_temp: "TMin",
    corpex_link_category: "MABCD",
    corpex_aadt_year: "Traff_Yr",
    corpex_aadt: "AADT",

    curvature: "Curv",
    deflection: "Defl",
};

impl StandardColumnNames {
    /// (name used in code, output column name) pairs, sorted by the name used in code.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries = vec![
            ("segment_name", self.segment_name),
            ("road_number", self.road_number),
            ("carriageway", self.carriageway),
            ("slk_from", self.slk_from),
            ("slk_to", self.slk_to),
            ("slk_length", self.slk_length),
            ("xsp", self.xsp),
            ("pavement_total_width", self.pavement_total_width),
            ("pavement_year_constructed", self.pavement_year_constructed),
            ("surface_width", self.surface_width),
            ("surface_width_oldest", self.surface_width_oldest),
            ("surface_year", self.surface_year),
            ("surface_type", self.surface_type),
            ("surface_aggregate_size", self.surface_aggregate_size),
            ("surface_asphalt_type", self.surface_asphalt_type),
            ("corpex_speed_limit", self.corpex_speed_limit),
            ("corpex_rainfall", self.corpex_rainfall),
            ("corpex_average_temp", self.corpex_average_temp),
            ("corpex_minimum_temp", self.corpex_minimum_temp),
            ("corpex_link_category", self.corpex_link_category),
            ("corpex_aadt_year", self.corpex_aadt_year),
            ("corpex_aadt", self.corpex_aadt),
            ("curvature", self.curvature),
            ("deflection", self.deflection),
        ];
        entries.sort_by_key(|(member, _)| *member);
        entries
    }
}

impl Display for StandardColumnNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = "Name used in code:";
        let entries = self.entries();
        let pad = entries
            .iter()
            .map(|(member, _)| member.len())
            .max()
            .unwrap_or(0)
            .max(heading.len());

        writeln!(f, "{:>pad$}   Output Column Name:", heading, pad = pad)?;
        writeln!(f, "{:>pad$}   -----", "-----", pad = pad)?;
        for (member, value) in entries {
            writeln!(f, "{:>pad$} : {}", member, value, pad = pad)?;
        }
        Ok(())
    }
}
