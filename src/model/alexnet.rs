//! AlexNet architecture for origami classification
//!
//! Implements the classic AlexNet topology with the Burn framework. Two
//! layers are sized from configuration rather than fixed: the first
//! convolution (input channel count) and the final fully-connected layer
//! (output class count). The trained weight record must match this modified
//! topology exactly; loading fails otherwise.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    tensor::{backend::Backend, Tensor},
};

use crate::utils::error::ClassifierError;

/// Spatial size of the feature map after adaptive average pooling
const POOLED_SIZE: usize = 6;

/// Channel count of the final convolutional layer
const FEATURE_CHANNELS: usize = 256;

/// Configuration for the AlexNet model
#[derive(Config, Debug)]
pub struct AlexNetConfig {
    /// Number of output classes
    #[config(default = "6")]
    pub num_classes: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Dropout rate in the classifier head
    #[config(default = "0.5")]
    pub dropout: f64,
}

/// AlexNet classifier
///
/// Architecture:
/// - 5 convolutional layers with ReLU, max-pooled after layers 1, 2, and 5
/// - Adaptive average pooling to a 6x6 feature map
/// - 3 fully-connected layers with dropout
#[derive(Module, Debug)]
pub struct AlexNet<B: Backend> {
    // Feature extractor
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    conv3: Conv2d<B>,
    conv4: Conv2d<B>,
    conv5: Conv2d<B>,
    pool: MaxPool2d,

    avgpool: AdaptiveAvgPool2d,

    // Classifier head
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    dropout: Dropout,

    num_classes: usize,
}

impl<B: Backend> AlexNet<B> {
    /// Create a new AlexNet from configuration
    pub fn new(config: &AlexNetConfig, device: &B::Device) -> Self {
        let conv1 = Conv2dConfig::new([config.in_channels, 64], [11, 11])
            .with_stride([4, 4])
            .with_padding(PaddingConfig2d::Explicit(2, 2))
            .init(device);
        let conv2 = Conv2dConfig::new([64, 192], [5, 5])
            .with_padding(PaddingConfig2d::Explicit(2, 2))
            .init(device);
        let conv3 = Conv2dConfig::new([192, 384], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv4 = Conv2dConfig::new([384, 256], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv5 = Conv2dConfig::new([256, FEATURE_CHANNELS], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);

        let pool = MaxPool2dConfig::new([3, 3]).with_strides([2, 2]).init();
        let avgpool = AdaptiveAvgPool2dConfig::new([POOLED_SIZE, POOLED_SIZE]).init();

        let flat_features = FEATURE_CHANNELS * POOLED_SIZE * POOLED_SIZE;
        let fc1 = LinearConfig::new(flat_features, 4096).init(device);
        let fc2 = LinearConfig::new(4096, 4096).init(device);
        let fc3 = LinearConfig::new(4096, config.num_classes).init(device);
        let dropout = DropoutConfig::new(config.dropout).init();

        Self {
            conv1,
            conv2,
            conv3,
            conv4,
            conv5,
            pool,
            avgpool,
            fc1,
            fc2,
            fc3,
            dropout,
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, in_channels, 224, 224]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let relu = Relu::new();

        // Feature extraction
        let x = self.pool.forward(relu.forward(self.conv1.forward(x)));
        let x = self.pool.forward(relu.forward(self.conv2.forward(x)));
        let x = relu.forward(self.conv3.forward(x));
        let x = relu.forward(self.conv4.forward(x));
        let x = self.pool.forward(relu.forward(self.conv5.forward(x)));

        // Pool to a fixed 6x6 map regardless of input resolution
        let x = self.avgpool.forward(x);

        // Flatten: [B, C, 6, 6] -> [B, C * 36]
        let [batch_size, channels, height, width] = x.dims();
        let x = x.reshape([batch_size, channels * height * width]);

        // Classifier head. Dropout is inert on non-autodiff backends, which
        // gives inference-mode behavior without a separate eval switch.
        let x = self.dropout.forward(x);
        let x = relu.forward(self.fc1.forward(x));
        let x = self.dropout.forward(x);
        let x = relu.forward(self.fc2.forward(x));
        self.fc3.forward(x)
    }

    /// Forward pass with softmax for probability output
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Check the loaded parameter shapes against the configured topology
    ///
    /// The recorder applies a weight record without validating shapes, so a
    /// record trained with a different head or stem loads silently and the
    /// model would then produce the record's class count. Call this right
    /// after weight loading; a mismatch is a fatal setup error.
    pub fn validate_shapes(&self, config: &AlexNetConfig) -> Result<(), ClassifierError> {
        let [_, stem_channels, _, _] = self.conv1.weight.val().dims();
        if stem_channels != config.in_channels {
            return Err(ClassifierError::Model(format!(
                "weight record stem expects {} input channels, topology is configured for {}",
                stem_channels, config.in_channels
            )));
        }

        let flat_features = FEATURE_CHANNELS * POOLED_SIZE * POOLED_SIZE;
        let [head_inputs, head_classes] = self.fc3.weight.val().dims();
        let [fc1_inputs, _] = self.fc1.weight.val().dims();
        if head_classes != config.num_classes || head_inputs != 4096 || fc1_inputs != flat_features
        {
            return Err(ClassifierError::Model(format!(
                "weight record head produces {} classes, topology is configured for {}",
                head_classes, config.num_classes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DefaultBackend;

    type TestBackend = DefaultBackend;

    #[test]
    fn test_alexnet_output_shape() {
        let device = Default::default();
        let config = AlexNetConfig::new();
        let model = AlexNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 224, 224], &device);
        let output = model.forward(input);
        let dims = output.dims();

        assert_eq!(dims[0], 1);
        assert_eq!(dims[1], 6);
    }

    #[test]
    fn test_alexnet_custom_class_count() {
        let device = Default::default();
        let config = AlexNetConfig::new().with_num_classes(4);
        let model = AlexNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 224, 224], &device);
        let output = model.forward(input);

        assert_eq!(output.dims()[1], 4);
        assert_eq!(model.num_classes(), 4);
    }

    #[test]
    fn test_validate_shapes_accepts_matching_topology() {
        let device = Default::default();
        let config = AlexNetConfig::new();
        let model = AlexNet::<TestBackend>::new(&config, &device);

        assert!(model.validate_shapes(&config).is_ok());
    }

    #[test]
    fn test_shape_mismatched_record_is_rejected() {
        use burn::record::CompactRecorder;

        let device = Default::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights");

        // A record saved from a 4-class head
        let four_class =
            AlexNet::<TestBackend>::new(&AlexNetConfig::new().with_num_classes(4), &device);
        four_class
            .save_file(&path, &CompactRecorder::new())
            .unwrap();

        // Loading into the 6-class topology succeeds, so shape validation
        // has to catch the mismatch afterwards
        let config = AlexNetConfig::new();
        let loaded = AlexNet::<TestBackend>::new(&config, &device)
            .load_file(&path, &CompactRecorder::new(), &device)
            .unwrap();

        let result = loaded.validate_shapes(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("4 classes"));
    }

    #[test]
    fn test_softmax_output_is_distribution() {
        let device = Default::default();
        let config = AlexNetConfig::new();
        let model = AlexNet::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 224, 224], &device);
        let probs = model.forward_softmax(input);
        let values: Vec<f32> = probs.into_data().to_vec().unwrap();

        assert_eq!(values.len(), 6);
        assert!(values.iter().all(|&p| (0.0..=1.0).contains(&p)));
        let sum: f32 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}
