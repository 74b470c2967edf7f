mod opener;

pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub use opener::DesktopLinkOpener;
