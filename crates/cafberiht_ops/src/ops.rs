//! The neural-graph operation set.

use cafberiht::Enumerator;

/// Every operation of a transformer compute graph, in graph order.
///
/// Members take their enumerator value from their position, so `AttnQ` is
/// `0` and `SampleTokens` is `99`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumerator)]
pub enum CoreType {
    // Weights
    AttnQ,
    AttnK,
    AttnV,
    AttnOutput,
    AttnNorm,
    FfnGate,
    FfnUp,
    FfnDown,
    MoeGate,
    MoeExpertsGate,
    MoeExpertsUp,
    MoeExpertsDown,
    FfnNorm,
    TokenEmbd,
    RopeFreqs,
    OutputNorm,
    Output,
    EndOfWeights,

    // Inputs
    InpTokens,
    InpPos,
    InpOutIds,
    CacheK,
    CacheV,
    KqMask,
    BenchmarkData,
    EndOfInputOnly,
    InpEmbdGetRows,
    EndOfGlobalInputs,

    // Per-block graph
    NormRmsNorm,
    AttnNormMul,
    QcurMulMat,
    QcurReshape,
    QcurRope,
    KcurMulMat,
    KcurReshape,
    KcurRope,
    VcurMulMat,
    KCacheView,
    KCacheViewCopy,
    VcurTranspose,
    VCacheView,
    VCacheViewCopy,
    VView,
    KView,
    QPermute,
    KqMulMat,
    KqSoftMax,
    KqvMulMat,
    KqvMergedPermute,
    KqvMergedCont,
    KqvOutMulMat,
    FfnInpAdd,
    NormPreFfnRmsNorm,
    FfnNormMul,
    FfnGateMulMat,
    FfnSilu,
    FfnUpMulMat,
    FfnGateParMul,
    FfnOutMulMat,
    MoeInpAdd,
    NormPreMoeRmsNorm,
    MoeNormMul,
    MoeRouterMulMat,
    MoeRouterSoftmax,
    MoeExpertSelect,
    MoeExpertGateMulMat,
    MoeExpertSilu,
    MoeExpertUpMulMat,
    MoeExpertGateParMul,
    MoeExpertDownMulMat,
    MoeExpertWeightedSum,
    LayerOutAdd,
    EndOfPerBlock,

    // Final block
    Node1016GetRows,
    Node1017GetRows,
    FinalFfnInpAdd,
    FinalNormPreRmsNorm,
    FinalFfnNormMul,
    FinalFfnGateMulMat,
    FinalFfnSilu,
    FinalFfnUpMulMat,
    FinalFfnGateParMul,
    FinalFfnOutMulMat,
    FinalMoeInpAdd,
    FinalNormPreMoeRmsNorm,
    FinalMoeNormMul,
    FinalMoeRouterMulMat,
    FinalMoeRouterSoftmax,
    FinalMoeExpertSelect,
    FinalMoeExpertGateMulMat,
    FinalMoeExpertSilu,
    FinalMoeExpertUpMulMat,
    FinalMoeExpertGateParMul,
    FinalMoeExpertDownMulMat,
    FinalMoeExpertWeightedSum,
    FinalLayerOutAdd,

    // Output head
    FinalNormRmsNorm,
    ResultNormMul,
    ResultOutputMulMat,
    SampleTokens,

    #[enumerator(count)]
    Count,
}
