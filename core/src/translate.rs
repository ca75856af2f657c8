//! Translation of character sequences between data types.
//!
//! Nucleotide sequences are translated to codons by grouping consecutive, non-overlapping
//! triplets of characters, dropping any trailing characters that do not make up a full triplet.
//! Codons are translated to amino acids under the standard genetic code.
//!
//! The supported translations are:
//!
//! | From        | To                     |
//! |-------------|------------------------|
//! | DNA, RNA    | DNA, RNA, Codon, AA    |
//! | Codon       | Codon, AA              |
//! | Any type    | The same type          |

use crate::{CharacterState, DataType, Error, TaxonData};

/// Returns the data type resulting from translating a data type to the named data type.
///
/// The name is one of "DNA", "RNA", "AA", "Protein", or "Codon", ignoring case. An unknown name or
/// an unsupported translation is an error.
pub fn target_type(from: DataType, to: &str) -> Result<DataType, Error> {
    let unsupported = || Error::UnsupportedTranslation {
        from,
        to: to.to_string(),
    };

    let target = match to.to_lowercase().as_str() {
        "dna" => DataType::Dna,
        "rna" => DataType::Rna,
        "aa" | "protein" => DataType::AminoAcid,
        "codon" => DataType::Codon,
        _ => return Err(unsupported()),
    };

    match (from, target) {
        (from, target) if from == target => Ok(target),
        (DataType::Dna | DataType::Rna, _) => Ok(target),
        (DataType::Codon, DataType::AminoAcid) => Ok(target),
        _ => Err(unsupported()),
    }
}

/// Translates a sequence to the named data type.
///
/// See [`target_type`] for the supported names and translations. Triplets that can only be stop
/// codons are translated to missing codons.
pub fn translate(data: &TaxonData, to: &str) -> Result<TaxonData, Error> {
    let from = data.data_type();
    let target = target_type(from, to)?;

    let states = match (from, target) {
        (from, target) if from == target => return Ok(data.clone()),
        (DataType::Dna | DataType::Rna, DataType::Dna | DataType::Rna) => data
            .iter()
            .map(|state| state.relabel(target))
            .collect::<Vec<_>>(),
        (DataType::Dna | DataType::Rna, DataType::Codon) => codons(data),
        (DataType::Dna | DataType::Rna, DataType::AminoAcid) => codons(data)
            .iter()
            .map(CharacterState::to_amino_acid)
            .collect::<Result<Vec<_>, _>>()?,
        (DataType::Codon, DataType::AminoAcid) => data
            .iter()
            .map(CharacterState::to_amino_acid)
            .collect::<Result<Vec<_>, _>>()?,
        _ => {
            return Err(Error::UnsupportedTranslation {
                from,
                to: to.to_string(),
            })
        }
    };

    TaxonData::from_states(data.taxon().clone(), target, states)
}

fn codons(data: &TaxonData) -> Vec<CharacterState> {
    data.as_slice()
        .chunks_exact(3)
        .map(|triplet| {
            CharacterState::codon_from_nucleotides([&triplet[0], &triplet[1], &triplet[2]])
                .unwrap_or_else(|| CharacterState::missing(DataType::Codon))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(data_type: DataType, s: &str) -> TaxonData {
        TaxonData::from_symbols("a", data_type, s.chars().map(String::from)).unwrap()
    }

    fn string(data: &TaxonData) -> String {
        data.iter().map(|s| s.string_value()).collect()
    }

    #[test]
    fn test_dna_to_codon_to_amino_acid() {
        let dna = data(DataType::Dna, "ATG");

        let codons = translate(&dna, "Codon").unwrap();
        assert_eq!(codons.data_type(), DataType::Codon);
        assert_eq!(string(&codons), "ATG");

        let amino_acids = translate(&codons, "AA").unwrap();
        assert_eq!(amino_acids.data_type(), DataType::AminoAcid);
        assert_eq!(string(&amino_acids), "M");
        assert_eq!(amino_acids.name(), "a");
    }

    #[test]
    fn test_trailing_characters_dropped() {
        let dna = data(DataType::Dna, "ATGGCCTTA");
        assert_eq!(translate(&dna, "codon").unwrap().len(), 3);

        let dna = data(DataType::Dna, "ATGGCCTTAG");
        let codons = translate(&dna, "codon").unwrap();
        assert_eq!(codons.len(), 3);
        assert_eq!(string(&codons), "ATGGCCTTA");

        assert_eq!(translate(&data(DataType::Dna, "AT"), "codon").unwrap().len(), 0);
    }

    #[test]
    fn test_dna_to_protein() {
        let dna = data(DataType::Dna, "ATGTGGTTTAAA");
        assert_eq!(string(&translate(&dna, "Protein").unwrap()), "MWFK");
    }

    #[test]
    fn test_rna_to_protein() {
        let rna = data(DataType::Rna, "AUGUGG");
        assert_eq!(string(&translate(&rna, "aa").unwrap()), "MW");
    }

    #[test]
    fn test_ambiguous_codons() {
        let dna = data(DataType::Dna, "ATRTTY");
        let translated = translate(&dna, "codon").unwrap();

        assert_eq!(translated[0].num_observed_states(), 2);
        assert!(!translated.is_character_resolved(0).unwrap());
        assert!(!translated.is_character_resolved(1).unwrap());

        let amino_acids = translate(&translated, "aa").unwrap();
        assert_eq!(amino_acids[0].num_observed_states(), 2);
        assert_eq!(string(&amino_acids), "(IM)F");
        assert!(amino_acids.is_character_resolved(1).unwrap());
    }

    #[test]
    fn test_stop_codons_are_missing() {
        let dna = data(DataType::Dna, "TAAATG");
        let codons = translate(&dna, "codon").unwrap();

        assert!(codons[0].is_missing());
        assert_eq!(string(&codons), "???ATG");
        assert_eq!(string(&translate(&dna, "aa").unwrap()), "?M");
    }

    #[test]
    fn test_gaps_and_missing() {
        let dna = data(DataType::Dna, "---???A-G");
        assert_eq!(string(&translate(&dna, "codon").unwrap()), "---??????");
        assert_eq!(string(&translate(&dna, "aa").unwrap()), "-??");
    }

    #[test]
    fn test_dna_to_rna() {
        let dna = data(DataType::Dna, "ACGTY-");
        let rna = translate(&dna, "RNA").unwrap();

        assert_eq!(rna.data_type(), DataType::Rna);
        assert_eq!(string(&rna), "ACGUY-");
        assert_eq!(string(&translate(&rna, "DNA").unwrap()), "ACGTY-");
    }

    #[test]
    fn test_same_type() {
        let aa = data(DataType::AminoAcid, "MW");
        assert_eq!(translate(&aa, "Protein").unwrap(), aa);
    }

    #[test]
    fn test_unsupported() {
        let aa = data(DataType::AminoAcid, "MW");
        assert_eq!(
            translate(&aa, "DNA"),
            Err(Error::UnsupportedTranslation {
                from: DataType::AminoAcid,
                to: String::from("DNA")
            })
        );

        let dna = data(DataType::Dna, "ACG");
        assert!(matches!(
            translate(&dna, "Morse"),
            Err(Error::UnsupportedTranslation { .. })
        ));

        let codons = translate(&dna, "codon").unwrap();
        assert!(translate(&codons, "dna").is_err());
    }

    #[test]
    fn test_target_type() {
        assert_eq!(target_type(DataType::Dna, "protein"), Ok(DataType::AminoAcid));
        assert_eq!(target_type(DataType::Rna, "CODON"), Ok(DataType::Codon));
        assert_eq!(
            target_type(DataType::Standard(2), "Standard"),
            Err(Error::UnsupportedTranslation {
                from: DataType::Standard(2),
                to: String::from("Standard")
            })
        );
    }
}
