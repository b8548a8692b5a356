#[async_trait::async_trait]
pub trait ProgressSender<P: Send>: Sync + Send {
    /// It can technically return error but we will ignore them.
    async fn update(&self, data: P);
}

#[async_trait::async_trait]
impl<P: Send> ProgressSender<P> for tokio::sync::mpsc::Sender<P> {
    async fn update(&self, data: P) {
        let _ = self.send(data).await;
    }
}

#[async_trait::async_trait]
impl<P: Send> ProgressSender<P> for tokio::sync::mpsc::UnboundedSender<P> {
    async fn update(&self, data: P) {
        let _ = self.send(data);
    }
}

#[async_trait::async_trait]
impl<P: Send> ProgressSender<P> for std::sync::mpsc::Sender<P> {
    async fn update(&self, data: P) {
        let _ = self.send(data);
    }
}

/// `ProgressSender` that drops every update.
pub struct IgnoreProgress;

#[async_trait::async_trait]
impl<P: Send + 'static> ProgressSender<P> for IgnoreProgress {
    async fn update(&self, _data: P) {}
}

/// Converts updates before handing them to a borrowed sender.
pub struct MappedSender<'a, I, T> {
    inner: &'a dyn ProgressSender<T>,
    mapper: Box<dyn Fn(I) -> T + Sync + Send + 'a>,
}

#[async_trait::async_trait]
impl<I: Send, T: Send> ProgressSender<I> for MappedSender<'_, I, T> {
    async fn update(&self, data: I) {
        let mapped = (self.mapper)(data);
        self.inner.update(mapped).await;
    }
}

impl<'a, I, T> MappedSender<'a, I, T> {
    pub fn new<F>(sender: &'a dyn ProgressSender<T>, mapper: F) -> Self
    where
        F: Fn(I) -> T + Sync + Send + 'a,
    {
        Self {
            inner: sender,
            mapper: Box::new(mapper),
        }
    }
}
