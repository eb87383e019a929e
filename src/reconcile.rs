use anyhow::{anyhow, Context, Result};
use log::{error, info};

use crate::api::{DnsApiClient, DnsRecord, Zone};
use crate::config::{Ensure, RecordSpec};

/// What happened to a configured record during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Unchanged,
    Deleted,
    Absent,
}

/// Brings the records of a zone in line with a list of [`RecordSpec`]s.
pub struct Reconciler<C> {
    client: C,
}

impl<C: DnsApiClient> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Applies every spec in order and stops at the first failure.
    pub async fn apply(&self, specs: &[RecordSpec]) -> Result<Vec<Outcome>> {
        let zones = self
            .client
            .list_zones()
            .await
            .context("Failed to list zones")?;

        let mut outcomes = Vec::with_capacity(specs.len());
        for spec in specs {
            let zone = zones
                .iter()
                .find(|zone| zone.name.eq_ignore_ascii_case(&spec.zone))
                .ok_or_else(|| anyhow!("Zone not found: {}", spec.zone))?;

            info!("Reconciling {} {} in {}", spec.name, spec.record_type, zone.name);
            match self.reconcile(zone, spec).await {
                Ok(outcome) => {
                    info!("{} {}: {:?}", spec.name, spec.record_type, outcome);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    error!("Failed to reconcile {} {}: {:#}", spec.name, spec.record_type, e);
                    return Err(e);
                }
            }
        }
        Ok(outcomes)
    }

    async fn reconcile(&self, zone: &Zone, spec: &RecordSpec) -> Result<Outcome> {
        let records = self
            .client
            .list_dns_records(&zone.id)
            .await
            .with_context(|| format!("Failed to list records of zone {}", zone.name))?;

        let candidates: Vec<DnsRecord> = records
            .into_iter()
            .filter(|record| {
                record.name.eq_ignore_ascii_case(&spec.name)
                    && record.record_type.eq_ignore_ascii_case(&spec.record_type)
            })
            .map(|record| with_zone(record, zone))
            .collect();

        match spec.ensure {
            Ensure::Present => self.ensure_present(zone, spec, candidates).await,
            Ensure::Absent => self.ensure_absent(spec, candidates).await,
        }
    }

    // A name may carry several values (round-robin A, TXT); any one holding
    // the configured content counts as a match.
    async fn ensure_present(
        &self,
        zone: &Zone,
        spec: &RecordSpec,
        candidates: Vec<DnsRecord>,
    ) -> Result<Outcome> {
        if candidates.iter().any(|record| record.content == spec.content) {
            return Ok(Outcome::Unchanged);
        }

        match candidates.into_iter().next() {
            None => {
                self.client
                    .create_dns_record(&zone.id, &spec.name, &spec.record_type, &spec.content)
                    .await
                    .with_context(|| format!("Failed to create {}", spec.name))?;
                Ok(Outcome::Created)
            }
            Some(mut record) => {
                info!("Updating {} (was {})", spec.name, record.content);
                record.content = spec.content.to_string();
                self.client
                    .update_dns_record(&record)
                    .await
                    .with_context(|| format!("Failed to update {}", record))?;
                Ok(Outcome::Updated)
            }
        }
    }

    // Without content every value of the name and type goes.
    async fn ensure_absent(&self, spec: &RecordSpec, candidates: Vec<DnsRecord>) -> Result<Outcome> {
        let targets: Vec<DnsRecord> = candidates
            .into_iter()
            .filter(|record| spec.content.is_empty() || record.content == spec.content)
            .collect();

        if targets.is_empty() {
            return Ok(Outcome::Absent);
        }

        for record in &targets {
            self.client
                .delete_dns_record(record)
                .await
                .with_context(|| format!("Failed to delete {}", record))?;
        }
        Ok(Outcome::Deleted)
    }
}

// Newer API responses leave zone_id out of listed records.
fn with_zone(mut record: DnsRecord, zone: &Zone) -> DnsRecord {
    if record.zone_id.is_empty() {
        record.zone_id = zone.id.clone();
    }
    record
}
