//! File locations for the raw exports and the processed outputs

pub struct RawDataPaths {
    pub daily_climate: &'static str,
    pub glacier_areas: &'static str,
    pub landcover_before: &'static str,
    pub landcover_after: &'static str,
}

pub struct ProcessedDataPaths {
    pub directory: &'static str,
    pub cleaned_climate_filename: &'static str,
    pub agriculture: &'static str,
    pub threatened_species: &'static str,
}

pub struct PersistenceConfig {
    pub raw: RawDataPaths,
    pub processed: ProcessedDataPaths,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    raw: RawDataPaths {
        daily_climate: "Data/Raw/Weather&Climate_data/dailyclimate_OpenDataNpl.csv",
        glacier_areas: "Data/Raw/Environment_data/Glacier_data/glacier_areas.csv",
        landcover_before: "Data/Raw/Environment_data/Landcover_2005.csv",
        landcover_after: "Data/Raw/Environment_data/Landcover_2015.csv",
    },
    processed: ProcessedDataPaths {
        directory: "processed",
        cleaned_climate_filename: "cleaned_dailyclimate.csv",
        agriculture: "processed/cleaned_agricultural_data.csv",
        threatened_species: "Data/processed/threatened_species_cleaned.csv",
    },
};

use std::path::PathBuf;

/// Where the cleaned daily climate table is written
pub fn cleaned_climate_path() -> PathBuf {
    PathBuf::from(PERSISTENCE.processed.directory).join(PERSISTENCE.processed.cleaned_climate_filename)
}
