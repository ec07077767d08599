use tracing::{debug, error};

use crate::catalog::SymbolCatalog;
use crate::error::MissingElementError;

use super::{ContainerId, NewElement, RenderTarget};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: usize,
    pub missing: Vec<MissingElementError>,
}

/// Adds one interactive button per catalog entry, vowels first, each group in
/// catalog order. A group whose container is absent is skipped.
pub fn render_catalog<T>(catalog: &SymbolCatalog, target: &mut T) -> RenderReport
where
    T: RenderTarget + ?Sized,
{
    let mut report = RenderReport::default();
    for (group, entry) in catalog.iter() {
        let container = ContainerId::for_group(group);
        if report.missing.contains(&MissingElementError::Container(container)) {
            continue;
        }
        match target.append(container, NewElement::button(&entry.symbol, &entry.audio)) {
            Ok(id) => {
                debug!(
                    symbol = %entry.symbol,
                    path = %entry.audio,
                    element = %id,
                    "button created"
                );
                report.rendered += 1;
            }
            Err(err) => {
                error!(%group, error = %err, "cannot render group");
                report.missing.push(err);
            }
        }
    }
    debug!(rendered = report.rendered, "buttons created for vowels and consonants");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPage;

    #[test]
    fn missing_group_is_reported_once() {
        let mut page = ChartPage::new().without_container(ContainerId::Vowels);
        let report = render_catalog(&SymbolCatalog::default(), &mut page);
        assert_eq!(report.rendered, 5);
        assert_eq!(
            report.missing,
            vec![MissingElementError::Container(ContainerId::Vowels)]
        );
        assert_eq!(page.children(ContainerId::Consonants).unwrap().len(), 5);
    }
}
