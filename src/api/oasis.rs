//! [CAISO OASIS](http://oasis.caiso.com) client.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use bon::Builder;
use chrono::{NaiveDate, NaiveTime};
use reqwest::{Client, Response, header};
use serde::Serialize;
use tokio::{fs, fs::File, io::AsyncWriteExt};

use crate::prelude::*;

const BASE_URL: &str = "http://oasis.caiso.com/oasisapi";

/// OASIS result format for CSV-in-ZIP payloads.
const CSV_IN_ZIP: u32 = 6;

const SHAPING_FACTORS_GROUP_ID: &str = "DAM_HRLY_ENE_SHAPING_FCTR_GRP";
const LMP_QUERY_NAME: &str = "PRC_SPTIE_LMP";

pub struct Api(Client);

impl Api {
    pub fn new() -> Result<Self> {
        Ok(Self(Client::builder().timeout(Duration::from_secs(60)).build()?))
    }

    /// Download the day-ahead hourly shaping factor archive for the trading date.
    #[instrument(skip_all, fields(date = %date))]
    pub async fn download_shaping_factors(
        &self,
        date: NaiveDate,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        info!("fetching…");
        let query = GroupZipQuery {
            version: 12,
            resultformat: CSV_IN_ZIP,
            groupid: SHAPING_FACTORS_GROUP_ID,
            startdatetime: group_zip_start_datetime(date),
        };
        let response = self
            .0
            .get(format!("{BASE_URL}/GroupZip"))
            .query(&query)
            .send()
            .await
            .context("failed to call the `GroupZip` endpoint")?
            .error_for_status()
            .context("the `GroupZip` request failed")?;
        save(response, target_dir, format!("{date}_shaping_factors.zip")).await
    }

    /// Download the locational marginal price archive.
    #[instrument(skip_all, fields(date = %request.date, node = %request.node))]
    pub async fn download_locational_prices(
        &self,
        request: &LmpRequest,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        info!("fetching…");
        let query = SingleZipQuery {
            resultformat: CSV_IN_ZIP,
            queryname: LMP_QUERY_NAME,
            version: 5,
            startdatetime: single_zip_datetime(request.date, request.start_time),
            enddatetime: single_zip_datetime(request.date, request.end_time),
            market_run_id: &request.market_run_id,
            node: &request.node,
        };
        let response = self
            .0
            .get(format!("{BASE_URL}/SingleZip"))
            .query(&query)
            .send()
            .await
            .context("failed to call the `SingleZip` endpoint")?
            .error_for_status()
            .context("the `SingleZip` request failed")?;
        save(response, target_dir, request.fallback_file_name()).await
    }
}

/// Locational marginal price query parameters.
#[derive(Builder)]
pub struct LmpRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub market_run_id: String,
    pub node: String,
}

impl LmpRequest {
    fn fallback_file_name(&self) -> String {
        format!(
            "{}_SingleZip_{}_{}.zip",
            self.date,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
        )
    }
}

#[derive(Serialize)]
struct GroupZipQuery<'a> {
    version: u32,
    resultformat: u32,
    groupid: &'a str,
    startdatetime: String,
}

#[derive(Serialize)]
struct SingleZipQuery<'a> {
    resultformat: u32,
    queryname: &'a str,
    version: u32,
    startdatetime: String,
    enddatetime: String,
    market_run_id: &'a str,
    node: &'a str,
}

/// `GroupZip` takes the trading date at a fixed start hour.
fn group_zip_start_datetime(date: NaiveDate) -> String {
    format!("{}T08:00-0000", date.format("%Y%m%d"))
}

fn single_zip_datetime(date: NaiveDate, time: NaiveTime) -> String {
    format!("{date}T{}-0000", time.format("%H:%M"))
}

/// Stream the response body into the target directory.
///
/// The file name comes from the `Content-Disposition` header when the server
/// provides one, and falls back to the supplied name otherwise.
async fn save(
    mut response: Response,
    target_dir: &Path,
    fallback_file_name: String,
) -> Result<PathBuf> {
    fs::create_dir_all(target_dir)
        .await
        .with_context(|| format!("failed to create `{}`", target_dir.display()))?;
    let file_name = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(file_name_from_content_disposition)
        .map_or(fallback_file_name, ToOwned::to_owned);
    let path = target_dir.join(file_name);
    let mut file = File::create(&path)
        .await
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    while let Some(chunk) =
        response.chunk().await.context("failed to read the response body")?
    {
        file.write_all(&chunk).await.context("failed to write the chunk")?;
    }
    info!(path = %path.display(), "saved");
    Ok(path)
}

fn file_name_from_content_disposition(value: &str) -> Option<&str> {
    let (_, file_name) = value.split_once("filename=")?;
    let file_name = file_name.split(';').next()?.trim().trim_matches('"');
    (!file_name.is_empty()).then_some(file_name)
}

#[cfg(test)]
mod tests {
    use chrono::{Days, Local};

    use super::*;

    #[test]
    fn test_group_zip_start_datetime() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 19).unwrap();
        assert_eq!(group_zip_start_datetime(date), "20241119T08:00-0000");
    }

    #[test]
    fn test_single_zip_datetime() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 19).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(single_zip_datetime(date, time), "2024-11-19T08:00-0000");
    }

    #[test]
    fn test_file_name_quoted() {
        assert_eq!(
            file_name_from_content_disposition(r#"attachment; filename="20241119_lmp.zip""#),
            Some("20241119_lmp.zip"),
        );
    }

    #[test]
    fn test_file_name_with_trailing_parameters() {
        assert_eq!(
            file_name_from_content_disposition("attachment; filename=lmp.zip; size=42"),
            Some("lmp.zip"),
        );
    }

    #[test]
    fn test_file_name_missing() {
        assert_eq!(file_name_from_content_disposition("attachment"), None);
    }

    #[test]
    fn test_fallback_file_name() {
        let request = LmpRequest::builder()
            .date(NaiveDate::from_ymd_opt(2024, 11, 19).unwrap())
            .start_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
            .end_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .market_run_id("RTPD".to_string())
            .node("PALOVRDE_ASR-APND".to_string())
            .build();
        assert_eq!(request.fallback_file_name(), "2024-11-19_SingleZip_08:00_09:00.zip");
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_download_shaping_factors_ok() -> Result {
        let date = Local::now().date_naive() - Days::new(1);
        let target_dir = std::env::temp_dir().join("caiso_shaping_factors");
        let path = Api::new()?.download_shaping_factors(date, &target_dir).await?;
        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_download_locational_prices_ok() -> Result {
        let request = LmpRequest::builder()
            .date(Local::now().date_naive() - Days::new(1))
            .start_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
            .end_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .market_run_id("RTPD".to_string())
            .node("PALOVRDE_ASR-APND".to_string())
            .build();
        let target_dir = std::env::temp_dir().join("caiso_lmp");
        let path = Api::new()?.download_locational_prices(&request, &target_dir).await?;
        assert!(path.exists());
        Ok(())
    }
}
