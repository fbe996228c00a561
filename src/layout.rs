use crate::field::FieldSlot;

/// 1-based line number of the column header in output.hru.
pub const HEADER_LINE_NUMBER: usize = 9;

/// 1-based line number of the layout detection probe (the first data line).
pub const PROBE_LINE_NUMBER: usize = HEADER_LINE_NUMBER + 1;

/// Width of every dynamic value column and of each header label slot.
pub const VALUES_COLUMN_WIDTH: usize = 10;

// Legacy (pre-rev.670) fixed-field offsets.
const LULC: FieldSlot = FieldSlot::new("LULC", 0, 4);
const HRU: FieldSlot = FieldSlot::new("HRU", 4, 5);
const GIS: FieldSlot = FieldSlot::new("GIS", 9, 10);
const SUB: FieldSlot = FieldSlot::new("SUB", 19, 5);
const MGT: FieldSlot = FieldSlot::new("MGT", 24, 5);
const MON: FieldSlot = FieldSlot::new("MON", 29, 5);
// Calendar date format replaces MON with three fields.
const MO: FieldSlot = FieldSlot::new("MO", 29, 3);
const DA: FieldSlot = FieldSlot::new("DA", 32, 3);
const YR: FieldSlot = FieldSlot::new("YR", 35, 5);

/// Column where the AREA value starts in the legacy layout.
pub const AREA_INDEX: usize = 34;
/// AREA start column when the file uses the calendar date format.
pub const AREA_INDEX_CALENDAR: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRevision {
    Legacy,
    /// Rev.670 of swat.exe added a space to the data line format, shifting
    /// every column right by one.
    Shifted,
}

/// Resolved offset table for one historical revision of output.hru.
/// Immutable once selected; applied uniformly to every data line of a file.
#[derive(Debug, Clone, Copy)]
pub struct HruLayout {
    pub revision: LayoutRevision,
    pub lulc: FieldSlot,
    pub hru: FieldSlot,
    pub gis: FieldSlot,
    pub sub: FieldSlot,
    pub mgt: FieldSlot,
    pub mon: FieldSlot,
    pub mo: FieldSlot,
    pub da: FieldSlot,
    pub yr: FieldSlot,
    pub area_index: usize,
    pub area_index_calendar: usize,
}

impl HruLayout {
    pub fn for_revision(revision: LayoutRevision) -> Self {
        let adjust = match revision {
            LayoutRevision::Legacy => 0,
            LayoutRevision::Shifted => 1,
        };
        HruLayout {
            revision,
            lulc: LULC.shifted(adjust),
            hru: HRU.shifted(adjust),
            gis: GIS.shifted(adjust),
            sub: SUB.shifted(adjust),
            mgt: MGT.shifted(adjust),
            mon: MON.shifted(adjust),
            mo: MO.shifted(adjust),
            da: DA.shifted(adjust),
            yr: YR.shifted(adjust),
            area_index: AREA_INDEX + adjust,
            area_index_calendar: AREA_INDEX_CALENDAR + adjust,
        }
    }
}

/// Decide which layout revision a file uses from its first data line.
///
/// The file carries no version marker, so this is a structural probe: read
/// the HRU slot with the legacy offsets and try to parse an integer. In a
/// shifted file that slot lands partly on the land-use code, so the parse
/// fails and the failure itself is the signal, not an error.
pub fn detect_revision(probe_line: &str) -> LayoutRevision {
    match HRU.get_int(probe_line) {
        Ok(_) => LayoutRevision::Legacy,
        Err(_) => LayoutRevision::Shifted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_LINE: &str =
        "AGRL    1  10001001    1    1    1  9.46E+00  1.20E+00";
    const SHIFTED_LINE: &str =
        " AGRL    1  10001001    1    1    1  9.46E+00  1.20E+00";

    #[test]
    fn numeric_probe_selects_legacy() {
        assert_eq!(detect_revision(LEGACY_LINE), LayoutRevision::Legacy);
    }

    #[test]
    fn non_numeric_probe_selects_shifted() {
        assert_eq!(detect_revision(SHIFTED_LINE), LayoutRevision::Shifted);
    }

    #[test]
    fn blank_probe_slot_selects_shifted() {
        assert_eq!(detect_revision(""), LayoutRevision::Shifted);
        assert_eq!(detect_revision("AGRL        "), LayoutRevision::Shifted);
    }

    #[test]
    fn shifted_layout_moves_every_offset_by_one() {
        let legacy = HruLayout::for_revision(LayoutRevision::Legacy);
        let shifted = HruLayout::for_revision(LayoutRevision::Shifted);
        assert_eq!(shifted.lulc.offset, legacy.lulc.offset + 1);
        assert_eq!(shifted.mon.offset, legacy.mon.offset + 1);
        assert_eq!(shifted.area_index, legacy.area_index + 1);
        assert_eq!(shifted.area_index_calendar, legacy.area_index_calendar + 1);
    }

    #[test]
    fn selected_layout_reads_shifted_line_correctly() {
        let layout = HruLayout::for_revision(detect_revision(SHIFTED_LINE));
        assert_eq!(layout.lulc.get(SHIFTED_LINE).unwrap(), "AGRL");
        assert_eq!(layout.hru.get_int(SHIFTED_LINE).unwrap(), 1);
        assert_eq!(layout.sub.get_int(SHIFTED_LINE).unwrap(), 1);
    }
}
