use crate::models::DocumentResult;

/// Merge per-document results into one, renumbering pages.
///
/// The first result is taken as-is, including whatever page indices it already
/// has. Every later result's pages are shifted by the number of pages
/// accumulated before it and appended. Metadata is merged shallowly, incoming
/// keys winning, but only while the accumulated result already carries
/// metadata: if the first result has none, later metadata is dropped.
pub fn combine_results(results: Vec<DocumentResult>) -> DocumentResult {
    let mut results = results.into_iter();
    let Some(mut combined) = results.next() else {
        return DocumentResult::default();
    };

    let mut page_offset = combined.pages.len() as u64;

    for result in results {
        let page_count = result.pages.len() as u64;

        combined
            .pages
            .extend(result.pages.into_iter().map(|mut page| {
                page.index += page_offset;
                page
            }));
        page_offset += page_count;

        if let (Some(existing), Some(incoming)) = (combined.metadata.as_mut(), result.metadata) {
            existing.extend(incoming);
        }
    }

    combined
}
