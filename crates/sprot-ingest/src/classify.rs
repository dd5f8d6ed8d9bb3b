//! Line classification for UniProtKB flat files
//!
//! A line's role is decided by the first entry of [`GRAMMAR`] whose prefix it
//! starts with. Longer prefixes come first so `FT   NON_TER` wins over a bare
//! `FT` rule should one ever be added.
//! See: https://web.expasy.org/docs/userman.html

/// Record-type tag of one flat-file line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `ID   <name> <status> <length> AA.`
    Id,
    /// `AC   <accession>; [<accession>;]...`
    Accession,
    /// `DE   Flags: ...`
    DescriptionFlags,
    /// `FT   NON_TER ...`
    NonTerminal,
    /// `OX   NCBI_TaxID=<id>;`
    TaxonomyId,
    /// `SQ   SEQUENCE <length> AA; <mw> MW; <crc64> CRC64;`
    Sequence,
    /// `//`
    Terminator,
    /// Anything else; ignored by the loader
    Other,
}

/// One `(prefix, kind)` pair of the line grammar
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub prefix: &'static str,
    pub kind: LineKind,
}

const fn rule(prefix: &'static str, kind: LineKind) -> LineRule {
    LineRule { prefix, kind }
}

/// Recognised line prefixes, most specific first
pub const GRAMMAR: &[LineRule] = &[
    rule("FT   NON_TER", LineKind::NonTerminal),
    rule("DE   Flags:", LineKind::DescriptionFlags),
    rule("ID", LineKind::Id),
    rule("AC", LineKind::Accession),
    rule("OX", LineKind::TaxonomyId),
    rule("SQ", LineKind::Sequence),
    rule("//", LineKind::Terminator),
];

/// Tag a line whose trailing whitespace has already been stripped
pub fn classify(line: &str) -> LineKind {
    GRAMMAR
        .iter()
        .find(|rule| line.starts_with(rule.prefix))
        .map_or(LineKind::Other, |rule| rule.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_is_ordered_most_specific_first() {
        for pair in GRAMMAR.windows(2) {
            assert!(
                pair[0].prefix.len() >= pair[1].prefix.len(),
                "{:?} must come before {:?}",
                pair[1].prefix,
                pair[0].prefix
            );
        }
    }

    #[test]
    fn test_classify_record_lines() {
        assert_eq!(
            classify("ID   001R_FRG3G              Reviewed;         256 AA."),
            LineKind::Id
        );
        assert_eq!(classify("AC   Q6GZX4;"), LineKind::Accession);
        assert_eq!(classify("OX   NCBI_TaxID=654924;"), LineKind::TaxonomyId);
        assert_eq!(
            classify("SQ   SEQUENCE   256 AA;  29735 MW;  B4840739BF7D4121 CRC64;"),
            LineKind::Sequence
        );
        assert_eq!(classify("//"), LineKind::Terminator);
    }

    #[test]
    fn test_classify_needs_full_literal_prefix() {
        assert_eq!(classify("DE   Flags: Fragment;"), LineKind::DescriptionFlags);
        assert_eq!(classify("DE   RecName: Full=Insulin;"), LineKind::Other);
        assert_eq!(classify("FT   NON_TER         1"), LineKind::NonTerminal);
        assert_eq!(classify("FT   CHAIN           1..256"), LineKind::Other);
        assert_eq!(classify("DE Flags: Fragment;"), LineKind::Other);
    }

    #[test]
    fn test_classify_other_lines() {
        assert_eq!(classify("DT   28-JUN-2011, integrated into UniProtKB/Swiss-Prot."), LineKind::Other);
        assert_eq!(classify("OS   Homo sapiens (Human)."), LineKind::Other);
        assert_eq!(classify("OC   Eukaryota; Metazoa; Chordata."), LineKind::Other);
        assert_eq!(classify("     MAFSAEDVLK EYDRRRRMEA LLLSLYYPND"), LineKind::Other);
        assert_eq!(classify(""), LineKind::Other);
        assert_eq!(classify("/"), LineKind::Other);
    }
}
