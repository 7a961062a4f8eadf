//! avlconfig extension for the playlist engine

use crate::classify::ClassifyOptions;
use crate::scan::ExtensionFilter;

/// Extension trait building [`ClassifyOptions`] from avlconfig::Config
pub trait ClassifyOptionsConfigExt {
    /// Classification options seeded from the configuration file.
    fn classify_options(&self) -> ClassifyOptions;
}

impl ClassifyOptionsConfigExt for avlconfig::Config {
    fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            dir_recurse: self.get_dir_recurse(),
            file_uri_filter: true,
            uri_filter_permissive: self.get_uri_filter_permissive(),
            extension_filter: ExtensionFilter::from_list(&self.get_scan_extensions()),
            proxy: self.get_proxy(),
            fetch_timeout_secs: Some(self.get_fetch_timeout_secs()),
            nested_depth_limit: self.get_nested_depth_limit(),
        }
    }
}
