use crate::error::{IngestError, Result};
use crate::field;
use crate::layout::{AREA_INDEX, AREA_INDEX_CALENDAR, VALUES_COLUMN_WIDTH};

/// One value column of the OutputHru table: the label swat.exe prints in
/// the header and the SQL column the value lands in.
#[derive(Debug, Clone, Copy)]
struct ValueColumn {
    label: &'static str,
    column: &'static str,
}

const fn col(label: &'static str, column: &'static str) -> ValueColumn {
    ValueColumn { label, column }
}

/// OutputHru value columns in schema declaration order.
///
/// Labels are not unique: the two water table depths both print as "WTAB".
/// Duplicates are claimed left to right, so declaration order here must
/// match the physical order swat.exe writes them in.
const VALUE_SCHEMA: &[ValueColumn] = &[
    col("PRECIPmm", "PRECIPmm"),
    col("SNOFALLmm", "SNOFALLmm"),
    col("SNOMELTmm", "SNOMELTmm"),
    col("IRRmm", "IRRmm"),
    col("PETmm", "PETmm"),
    col("ETmm", "ETmm"),
    col("SW_INITmm", "SW_INITmm"),
    col("SW_ENDmm", "SW_ENDmm"),
    col("PERCmm", "PERCmm"),
    col("GW_RCHGmm", "GW_RCHGmm"),
    col("DA_RCHGmm", "DA_RCHGmm"),
    col("REVAPmm", "REVAPmm"),
    col("SA_IRRmm", "SA_IRRmm"),
    col("DA_IRRmm", "DA_IRRmm"),
    col("SA_STmm", "SA_STmm"),
    col("DA_STmm", "DA_STmm"),
    col("SURQ_GENmm", "SURQ_GENmm"),
    col("SURQ_CNTmm", "SURQ_CNTmm"),
    col("TLOSSmm", "TLOSSmm"),
    col("LATQGENmm", "LATQGENmm"),
    col("GW_Qmm", "GW_Qmm"),
    col("WYLDmm", "WYLDmm"),
    col("DAILYCN", "DAILYCN"),
    col("TMP_AVdgC", "TMP_AVdgC"),
    col("TMP_MXdgC", "TMP_MXdgC"),
    col("TMP_MNdgC", "TMP_MNdgC"),
    col("SOL_TMPdgC", "SOL_TMPdgC"),
    col("SOLARMJ/m2", "SOLARMJ_m2"),
    col("SYLDt/ha", "SYLDt_ha"),
    col("USLEt/ha", "USLEt_ha"),
    col("N_APPkg/ha", "N_APPkg_ha"),
    col("P_APPkg/ha", "P_APPkg_ha"),
    col("NAUTOkg/ha", "NAUTOkg_ha"),
    col("PAUTOkg/ha", "PAUTOkg_ha"),
    col("NGRZkg/ha", "NGRZkg_ha"),
    col("PGRZkg/ha", "PGRZkg_ha"),
    col("NCFRTkg/ha", "NCFRTkg_ha"),
    col("PCFRTkg/ha", "PCFRTkg_ha"),
    col("NRAINkg/ha", "NRAINkg_ha"),
    col("NFIXkg/ha", "NFIXkg_ha"),
    col("F-MNkg/ha", "F_MNkg_ha"),
    col("A-MNkg/ha", "A_MNkg_ha"),
    col("A-SNkg/ha", "A_SNkg_ha"),
    col("F-MPkg/ha", "F_MPkg_ha"),
    col("AO-LPkg/ha", "AO_LPkg_ha"),
    col("L-APkg/ha", "L_APkg_ha"),
    col("A-SPkg/ha", "A_SPkg_ha"),
    col("DNITkg/ha", "DNITkg_ha"),
    col("NUPkg/ha", "NUPkg_ha"),
    col("PUPkg/ha", "PUPkg_ha"),
    col("ORGNkg/ha", "ORGNkg_ha"),
    col("ORGPkg/ha", "ORGPkg_ha"),
    col("SEDPkg/ha", "SEDPkg_ha"),
    col("NSURQkg/ha", "NSURQkg_ha"),
    col("NLATQkg/ha", "NLATQkg_ha"),
    col("NO3Lkg/ha", "NO3Lkg_ha"),
    col("NO3GWkg/ha", "NO3GWkg_ha"),
    col("SOLPkg/ha", "SOLPkg_ha"),
    col("P_GWkg/ha", "P_GWkg_ha"),
    col("W_STRS", "W_STRS"),
    col("TMP_STRS", "TMP_STRS"),
    col("N_STRS", "N_STRS"),
    col("P_STRS", "P_STRS"),
    col("BIOMt/ha", "BIOMt_ha"),
    col("LAI", "LAI"),
    col("YLDt/ha", "YLDt_ha"),
    col("BACTPct", "BACTPct"),
    col("BACTLPct", "BACTLPct"),
    col("WTAB", "WTAB_CLI"),
    col("WTAB", "WTAB_SOL"),
    col("SNOmm", "SNOmm"),
    col("CMUPkg/ha", "CMUPkg_ha"),
    col("CMTOTkg/ha", "CMTOTkg_ha"),
    col("QTILEmm", "QTILEmm"),
    col("TNO3kg/ha", "TNO3kg_ha"),
    col("LNO3kg/ha", "LNO3kg_ha"),
    col("GW_Q_Dmm", "GW_Q_Dmm"),
    col("LATQCNTmm", "LATQCNTmm"),
    col("TVAPkg/ha", "TVAPkg_ha"),
];

/// One resolved header slot, in the header's left-to-right physical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderColumn {
    pub label: String,
    pub column: &'static str,
}

/// Slice the header line into fixed-width label slots and resolve each
/// trimmed label to its SQL column.
///
/// Labels start right after the AREA header slot. Header positions always
/// use the legacy area index: rev.670 shifted the data line format but left
/// the header string untouched. A label with no unclaimed schema entry
/// means this file does not match the OutputHru record shape, which is
/// fatal before any row is written.
pub fn map_header(header_line: &str, use_calendar_date_format: bool) -> Result<Vec<HeaderColumn>> {
    let area_index = if use_calendar_date_format {
        AREA_INDEX_CALENDAR
    } else {
        AREA_INDEX
    };

    let mut claimed = vec![false; VALUE_SCHEMA.len()];
    let mut columns = Vec::new();
    let mut index = area_index + VALUES_COLUMN_WIDTH;

    while index < header_line.len() {
        let label = field::slice(header_line, index, VALUES_COLUMN_WIDTH)
            .unwrap_or("")
            .trim();
        let position = VALUE_SCHEMA
            .iter()
            .enumerate()
            .find(|(i, entry)| !claimed[*i] && entry.label == label)
            .map(|(i, _)| i)
            .ok_or_else(|| IngestError::SchemaMismatch {
                label: label.to_string(),
            })?;
        claimed[position] = true;
        columns.push(HeaderColumn {
            label: label.to_string(),
            column: VALUE_SCHEMA[position].column,
        });
        index += VALUES_COLUMN_WIDTH;
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with(labels: &[&str]) -> String {
        let mut line = format!("{:44}", "LULC  HRU");
        for label in labels {
            line.push_str(&format!("{label:>10}"));
        }
        line
    }

    #[test]
    fn labels_resolve_in_header_order() {
        let line = header_with(&["PRECIPmm", "ETmm", "SYLDt/ha"]);
        let columns = map_header(&line, false).unwrap();
        assert_eq!(
            columns.iter().map(|c| c.column).collect::<Vec<_>>(),
            vec!["PRECIPmm", "ETmm", "SYLDt_ha"]
        );
        assert_eq!(columns[2].label, "SYLDt/ha");
    }

    #[test]
    fn duplicate_labels_claim_schema_entries_in_declaration_order() {
        let line = header_with(&["WTAB", "WTAB"]);
        let columns = map_header(&line, false).unwrap();
        assert_eq!(columns[0].column, "WTAB_CLI");
        assert_eq!(columns[1].column, "WTAB_SOL");
    }

    #[test]
    fn mapping_is_idempotent() {
        let line = header_with(&["PRECIPmm", "WTAB", "WTAB", "LAI"]);
        let first = map_header(&line, false).unwrap();
        let second = map_header(&line, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_label_is_a_schema_mismatch() {
        let line = header_with(&["PRECIPmm", "BOGUSmm"]);
        assert!(matches!(
            map_header(&line, false),
            Err(IngestError::SchemaMismatch { label }) if label == "BOGUSmm"
        ));
    }

    #[test]
    fn calendar_format_starts_labels_after_the_calendar_area_slot() {
        let mut line = format!("{:50}", "LULC  MON");
        line.push_str(&format!("{:>10}", "PRECIPmm"));
        let columns = map_header(&line, true).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].column, "PRECIPmm");
    }

    #[test]
    fn header_without_value_slots_maps_to_nothing() {
        let columns = map_header("LULC  HRU", false).unwrap();
        assert!(columns.is_empty());
    }
}
