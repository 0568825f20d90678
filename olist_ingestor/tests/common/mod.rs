#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use async_trait::async_trait;
use olist_ingestor::sources::{DataSource, NotFoundSnafu, SourceError};
use zip::write::SimpleFileOptions;

/// Serves canned bytes per URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct MemorySource {
    bodies: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => NotFoundSnafu { url }.fail(),
        }
    }
}

pub fn zip_of(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip member");
        writer.write_all(body.as_bytes()).expect("write zip member");
    }
    writer.finish().expect("finish zip").into_inner()
}

pub const SELLERS_CSV: &str = "\
Unnamed: 0,seller_id,seller_zip_code_prefix,seller_city,seller_state
0,s1,13023,campinas,SP
1,s2,13844,mogi guacu,SP
2,s3,20031,rio de janeiro,RJ
";

pub const GEOLOCATION_CSV: &str = "\
Unnamed: 0,geolocation_zip_code_prefix,geolocation_lat,geolocation_lng,geolocation_city,geolocation_state
0,1037,-23.54,-46.63,sao paulo,SP
1,1037,-23.55,-46.64,sao paulo,SP
";
