//! Self-signed certificate generation with OpenSSL.
//!
//! Built with the `certs` feature (on by default). Without it the generator
//! still exists but every call fails with a generation error, so a plan that
//! asks for certificates is refused at execution time.

use roost_core::{
    application::{ApplicationError, ports::CertificateGenerator},
    domain::{CertificateBundle, CertificateRequest},
    error::{RoostError, RoostResult},
};

/// RSA modulus size of generated keys.
pub const KEY_BITS: u32 = 2048;

/// Generates PEM material for local HTTPS development.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpensslCertificateGenerator;

impl OpensslCertificateGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn generation_error(reason: impl std::fmt::Display) -> RoostError {
    ApplicationError::Generation {
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(feature = "certs")]
impl CertificateGenerator for OpensslCertificateGenerator {
    #[tracing::instrument(skip_all, fields(common_name = %request.common_name))]
    fn generate(&self, request: &CertificateRequest) -> RoostResult<CertificateBundle> {
        let bundle = imp::self_signed(request).map_err(generation_error)?;
        tracing::debug!("self-signed certificate generated");
        Ok(bundle)
    }
}

#[cfg(not(feature = "certs"))]
impl CertificateGenerator for OpensslCertificateGenerator {
    fn generate(&self, _request: &CertificateRequest) -> RoostResult<CertificateBundle> {
        Err(generation_error(
            "roost was built without certificate support (enable the `certs` feature)",
        ))
    }
}

#[cfg(feature = "certs")]
mod imp {
    use chrono::{Months, Utc};
    use openssl::{
        asn1::Asn1Time,
        bn::BigNum,
        hash::MessageDigest,
        nid::Nid,
        pkey::PKey,
        rsa::Rsa,
        x509::{X509, X509NameBuilder},
    };

    use super::{CertificateBundle, CertificateRequest, KEY_BITS};

    type BoxError = Box<dyn std::error::Error + Send + Sync>;

    pub(super) fn self_signed(request: &CertificateRequest) -> Result<CertificateBundle, BoxError> {
        let rsa = Rsa::generate(KEY_BITS)?;
        let public_key_pem = String::from_utf8(rsa.public_key_to_pem()?)?;
        let private_key_pem = String::from_utf8(rsa.private_key_to_pem()?)?;
        let key = PKey::from_rsa(rsa)?;

        let mut name = X509NameBuilder::new()?;
        name.append_entry_by_nid(Nid::COMMONNAME, &request.common_name)?;
        name.append_entry_by_nid(Nid::COUNTRYNAME, &request.country_name)?;
        for (nid, value) in [
            (Nid::STATEORPROVINCENAME, &request.state_name),
            (Nid::LOCALITYNAME, &request.locality_name),
            (Nid::ORGANIZATIONNAME, &request.organization_name),
            (Nid::ORGANIZATIONALUNITNAME, &request.organizational_unit),
        ] {
            if !value.is_empty() {
                name.append_entry_by_nid(nid, value)?;
            }
        }
        let name = name.build();

        let now = Utc::now();
        let expiry = now
            .checked_add_months(Months::new(12 * request.validity_years))
            .ok_or_else(|| {
                format!("validity of {} years is out of range", request.validity_years)
            })?;

        let mut builder = X509::builder()?;
        builder.set_version(2)?;
        let serial = BigNum::from_u32(1)?.to_asn1_integer()?;
        builder.set_serial_number(&serial)?;
        builder.set_subject_name(&name)?;
        builder.set_issuer_name(&name)?;
        builder.set_pubkey(&key)?;
        let not_before = Asn1Time::from_unix(now.timestamp())?;
        let not_after = Asn1Time::from_unix(expiry.timestamp())?;
        builder.set_not_before(&not_before)?;
        builder.set_not_after(&not_after)?;
        builder.sign(&key, MessageDigest::sha256())?;
        let certificate_pem = String::from_utf8(builder.build().to_pem()?)?;

        Ok(CertificateBundle {
            public_key_pem,
            certificate_pem,
            private_key_pem,
        })
    }
}
