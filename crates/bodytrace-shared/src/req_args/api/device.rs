use bodytrace_time::DateRange;

use crate::{errors::ValidationError, imei::Imei, pagination::PageRequest};

/// Devices to fetch readings for. Sent as a single string when there is only
/// one which is what the backend expects for end users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeviceDataReqArgs {
    pub imei: ImeiParam,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ImeiParam {
    One(Imei),
    Many(Vec<Imei>),
}

impl ImeiParam {
    pub fn new(mut imeis: Vec<Imei>) -> Result<Self, ValidationError> {
        match imeis.len() {
            0 => Err(ValidationError::MissingField("IMEI")),
            1 => Ok(Self::One(imeis.remove(0))),
            _ => Ok(Self::Many(imeis)),
        }
    }
}

impl DeviceDataReqArgs {
    pub fn new(imeis: Vec<Imei>) -> Result<Self, ValidationError> {
        Ok(Self {
            imei: ImeiParam::new(imeis)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredDataReqArgs {
    pub imei: ImeiParam,
    pub start_date: String,
    pub end_date: String,
    pub page: u32,
    pub limit: u32,
}

impl FilteredDataReqArgs {
    pub fn new(
        imeis: Vec<Imei>,
        range: &DateRange,
        page: PageRequest,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            imei: ImeiParam::new(imeis)?,
            start_date: range.start_param(),
            end_date: range.end_param(),
            page: page.page(),
            limit: page.limit(),
        })
    }
}
