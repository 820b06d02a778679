//! Shared fixtures: a tiny cache directory that stands in for the census
//! downloads so the pipeline runs without network access.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use zcta_ingest::IngestConfig;

pub const RELATIONSHIP_FILE: &str = "zcta_county_rel_10.txt";
pub const GAZETTEER_FILE: &str = "Gaz_counties_national.zip";
pub const ZIP_CODES_FILE: &str = "free-zipcode-database-Primary.csv";

pub const RELATIONSHIP: &str = "\
ZCTA5,STATE,COUNTY,GEOID,POPPT,HUPT
11501,36,059,36059,18769,7041
59714,30,031,30031,7904,3370
59715,30,031,30031,31024,13428
59715,30,067,30067,12,9
59718,30,031,30031,24364,10925
83001,56,039,56039,15443,11617
";

pub const GAZETTEER: &str = "\
USPS\tGEOID\tANSICODE\tNAME\tPOP10\tHU10\tALAND\tAWATER\tALAND_SQMI\tAWATER_SQMI\tINTPTLAT\tINTPTLONG
MT\t30031\t01720038\tGallatin County\t89513\t42289\t6739936440\t29104036\t2602.305\t11.237\t45.540613\t-111.170277
MT\t30067\t01720045\tPark County\t15636\t9514\t7265690220\t43547613\t2805.302\t16.814\t45.488180\t-110.526217
NY\t36059\t00974128\tNassau County\t1339532\t468346\t737080302\t503883282\t284.588\t194.551\t40.740665\t-73.589419
NY\t36103\t00974149\tSuffolk County\t1493350\t569985\t2360940606\t3785931591\t911.564\t1461.757\t40.883201\t-72.801217
WY\t56039\t01605083\tTeton County\t21294\t12813\t10347985424\t570226290\t3995.382\t220.166\t44.049100\t-110.588200
";

pub const ZIP_CODES: &str = "\
\"Zipcode\",\"ZipCodeType\",\"City\",\"State\",\"LocationType\",\"Lat\",\"Long\",\"Location\"
\"00501\",\"UNIQUE\",\"HOLTSVILLE\",\"NY\",\"PRIMARY\",40.81,-73.04,\"NA-US-NY-HOLTSVILLE\"
\"11501\",\"STANDARD\",\"MINEOLA\",\"NY\",\"PRIMARY\",40.74,-73.64,\"NA-US-NY-MINEOLA\"
\"59716\",\"PO BOX\",\"BIG SKY\",\"MT\",\"PRIMARY\",45.26,-111.30,\"NA-US-MT-BIG SKY\"
\"96860\",\"MILITARY\",\"PEARL HARBOR\",\"HI\",\"PRIMARY\",,,\"NA-US-HI-PEARL HARBOR\"
";

/// Zip archive bytes holding `text` as its only entry
pub fn gazetteer_archive(text: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("Gaz_counties_national.txt", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(text.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Populate `dir` as if all three sources had already been downloaded
pub fn write_fixture_cache(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(RELATIONSHIP_FILE), RELATIONSHIP).unwrap();
    std::fs::write(dir.join(GAZETTEER_FILE), gazetteer_archive(GAZETTEER)).unwrap();
    std::fs::write(dir.join(ZIP_CODES_FILE), ZIP_CODES).unwrap();
}

/// Config whose source URLs resolve to the fixture cache file names
///
/// The host is unroutable; a cache miss fails instead of reaching the internet.
pub fn fixture_config(cache_dir: &Path, output_dir: &Path) -> IngestConfig {
    IngestConfig::builder()
        .county_zcta_url(format!("http://127.0.0.1:9/{RELATIONSHIP_FILE}"))
        .county_geo_url(format!("http://127.0.0.1:9/{GAZETTEER_FILE}"))
        .zip_codes_url(format!("http://127.0.0.1:9/{ZIP_CODES_FILE}"))
        .cache_dir(cache_dir)
        .output_dir(output_dir)
        .build()
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
