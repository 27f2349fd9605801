pub const DEFAULT_LICENSE_ID: &str = "odc-odbl";

const WITH_PERMISSION: &str = "NonCommercialWithPermission-CommercialWithPermission-ReferenceRequired";
const ALLOWED_WITH_REFERENCE: &str = "NonCommercialAllowed-CommercialAllowed-ReferenceRequired";
const ALLOWED_WITHOUT_REFERENCE: &str = "NonCommercialAllowed-CommercialAllowed-ReferenceNotRequired";

/// Maps a license code to the opendata.swiss rights string. A missing code
/// counts as `odc-odbl`; unknown codes get the most restrictive terms.
pub fn rights_for(license_id: Option<&str>) -> &'static str {
    match license_id.unwrap_or(DEFAULT_LICENSE_ID) {
        "wsl-data" => WITH_PERMISSION,
        "odc-odbl" | "cc-by" | "cc-by-sa" => ALLOWED_WITH_REFERENCE,
        "cc-zero" | "CC0-1.0" => ALLOWED_WITHOUT_REFERENCE,
        _ => WITH_PERMISSION,
    }
}
